use super::coerce;
use crate::schema::{Embedding, FieldDescriptor};
use crate::value::Object;
use crate::{err, Error, Result, TreeNode, Value};

use indexmap::IndexMap;
use std::collections::HashSet;

/// Largest ordinal index an ordinal-list field can claim.
pub const MAX_ORDINAL_INDEX: usize = u16::MAX as usize;

/// Converts a value to a tree.
///
/// `field` is the field the value is stored in, if any; its date format
/// applies to date values, including the elements of date collections.
pub fn serialize(value: &Value, field: Option<&FieldDescriptor>) -> Result<TreeNode> {
    match value {
        Value::Null => Ok(TreeNode::Null),
        Value::Map(entries) => {
            let mut map = IndexMap::with_capacity(entries.len());
            for (key, value) in entries {
                map.insert(coerce::key_string(key)?, serialize(value, field)?);
            }
            Ok(TreeNode::Map(map))
        }
        Value::List(items) | Value::Set(items) => items
            .iter()
            .map(|item| serialize(item, field))
            .collect::<Result<Vec<_>>>()
            .map(TreeNode::List),
        Value::Tree(node) => Ok(node.clone()),
        Value::Object(object) => serialize_object(object),
        Value::Date(_) | Value::DateTime(_) | Value::Timestamp(_) => {
            match field.and_then(|field| field.attrs.format.as_ref()) {
                Some(format) => format.format(value),
                None => coerce::to_node(value),
            }
        }
        _ => coerce::to_node(value),
    }
}

fn serialize_object(object: &Object) -> Result<TreeNode> {
    let descriptor = object.descriptor();

    if object.fields().len() != descriptor.fields.len() {
        return Err(Error::configuration(format!(
            "object of type `{}` has {} values for {} fields",
            descriptor.name,
            object.fields().len(),
            descriptor.fields.len()
        )));
    }

    let fields = descriptor
        .fields
        .iter()
        .zip(object.fields())
        .filter(|(field, _)| field.is_retained());

    match descriptor.embedding {
        Some(Embedding::OrdinalList) => {
            let mut node = TreeNode::list();
            let mut taken = HashSet::new();

            for (field, value) in fields {
                let Some(at) = field.attrs.at else {
                    return Err(missing_ordinal(field));
                };

                if at > MAX_ORDINAL_INDEX {
                    return Err(Error::configuration(format!(
                        "ordinal index {at} of `{}` exceeds {MAX_ORDINAL_INDEX}",
                        field.full_name()
                    )));
                }

                if !taken.insert(at) {
                    return Err(Error::configuration(format!(
                        "ordinal index {at} of `{}` is already taken",
                        field.full_name()
                    )));
                }

                node.set_at(at, serialize_field(field, value)?);
            }

            Ok(node)
        }
        Some(Embedding::KeyedMap) | None => {
            let mut map = IndexMap::with_capacity(descriptor.fields.len());

            for (field, value) in fields {
                let key = field.map_key_name();
                if map.contains_key(key) {
                    return Err(Error::configuration(format!(
                        "map key `{key}` of `{}` is already taken",
                        field.full_name()
                    )));
                }

                map.insert(key.to_string(), serialize_field(field, value)?);
            }

            Ok(TreeNode::Map(map))
        }
    }
}

fn serialize_field(field: &FieldDescriptor, value: &Value) -> Result<TreeNode> {
    serialize(value, Some(field))
        .map_err(|e| e.context(err!("serializing field `{}`", field.full_name())))
}

pub(super) fn missing_ordinal(field: &FieldDescriptor) -> Error {
    Error::configuration(format!(
        "field `{}` of an ordinal-list type has no ordinal index",
        field.full_name()
    ))
}
