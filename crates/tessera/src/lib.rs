extern crate self as tessera;

#[doc(hidden)]
pub mod codegen_support;

mod reflect;
pub use reflect::Reflect;

pub use tessera_core::{bail, embed, err, schema, tree, value};
pub use tessera_core::{Describe, Error, Registry, Result, TreeNode, Value};

pub use tessera_macros::Reflect;

/// Serializes a value to a tree.
pub fn to_tree<T: Reflect>(value: &T) -> Result<TreeNode> {
    embed::serialize(&value.to_value(), None)
}

/// Reads a value out of a tree.
pub fn from_tree<T: Reflect>(node: &TreeNode) -> Result<T> {
    let value = embed::deserialize(&T::ty(), node)?;
    T::from_value(value)
}

/// Serializes a value to compact JSON text.
pub fn to_json<T: Reflect>(value: &T) -> Result<String> {
    Ok(to_tree(value)?.to_string())
}

pub fn from_json<T: Reflect>(text: &str) -> Result<T> {
    from_tree(&TreeNode::parse(text)?)
}
