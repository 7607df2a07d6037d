mod auto;
pub(crate) use auto::Generator;

mod column;
pub(crate) use column::Column;

mod enumeration;
pub(crate) use enumeration::Enumeration;

mod error;
pub(crate) use error::Diagnostics;

mod field;
pub(crate) use field::{Field, FieldKind};

mod lifecycle;
pub(crate) use lifecycle::Lifecycle;

mod model;
pub(crate) use model::Model;

mod model_attr;
pub(crate) use model_attr::{Embedding, ModelAttr};
