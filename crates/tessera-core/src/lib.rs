pub mod embed;

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::{Describe, Registry};

pub mod tree;
pub use tree::TreeNode;

pub mod value;
pub use value::Value;

/// A Result type alias that uses Tessera's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
