mod column;

mod descriptor;
pub use descriptor::{Describe, DescriptorBuilder, Embedding, TypeDescriptor, TypeRef};

mod entity;
pub use entity::{EntityMetadata, FieldRole};

mod enumeration;
pub use enumeration::EnumDescriptor;

mod field;
pub use field::{FieldAttrs, FieldDescriptor, Generator, Retention};

mod lifecycle;
pub use lifecycle::{Callback, LifecyclePhase, MethodDescriptor, Projection};

mod registry;
pub use registry::{Builder, Registry};

mod ty;
pub use ty::Type;
