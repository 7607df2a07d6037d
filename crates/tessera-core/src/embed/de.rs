use super::{coerce, ser::missing_ordinal};
use crate::schema::{Embedding, FieldDescriptor, Type, TypeRef};
use crate::tree::NodeKind;
use crate::value::Object;
use crate::{err, Error, Result, TreeNode, Value};

/// Reads a value of type `ty` out of a tree.
pub fn deserialize(ty: &Type, node: &TreeNode) -> Result<Value> {
    read(ty, None, Some(node))
}

/// Reads the value of `field` out of `node`, applying the field's date
/// format. `None` means the field was absent.
pub fn deserialize_field(field: &FieldDescriptor, node: Option<&TreeNode>) -> Result<Value> {
    read(&field.ty, Some(field), node)
        .map_err(|e| e.context(err!("deserializing field `{}`", field.full_name())))
}

// `field` is the field being read, if any. Its date format applies to date
// elements of collections too.
fn read(ty: &Type, field: Option<&FieldDescriptor>, node: Option<&TreeNode>) -> Result<Value> {
    let node = match node {
        Some(node) if !node.is_null() => node,
        _ => return Ok(coerce::absent(ty)),
    };

    match ty {
        Type::Option(inner) => read(inner, field, Some(node)),
        Type::Tree => Ok(Value::Tree(node.clone())),
        Type::Struct(target) => read_object(*target, node),
        Type::Map(key, value) => {
            let Some(map) = node.as_map() else {
                return Err(mismatch(ty, field, NodeKind::Map, node));
            };

            let mut entries = Vec::with_capacity(map.len());
            for (k, v) in map {
                entries.push((coerce::from_key(key, k)?, read(value, field, Some(v))?));
            }
            Ok(Value::Map(entries))
        }
        Type::List(item) => {
            let items = list(ty, field, node)?;
            let mut values = Vec::with_capacity(items.len());
            for element in items {
                values.push(read(item, field, Some(element))?);
            }
            Ok(Value::List(values))
        }
        Type::Set(item) => {
            let items = list(ty, field, node)?;
            let mut values: Vec<Value> = Vec::with_capacity(items.len());
            for element in items {
                let value = read(item, field, Some(element))?;
                if !values.contains(&value) {
                    values.push(value);
                }
            }
            Ok(Value::Set(values))
        }
        Type::Date | Type::DateTime | Type::Timestamp => {
            match field.and_then(|field| field.attrs.format.as_ref()) {
                Some(format) => format.parse(ty, node),
                None => coerce::from_node(ty, Some(node)),
            }
        }
        _ => coerce::from_node(ty, Some(node)),
    }
}

fn list<'a>(
    ty: &Type,
    field: Option<&FieldDescriptor>,
    node: &'a TreeNode,
) -> Result<&'a [TreeNode]> {
    node.as_list()
        .ok_or_else(|| mismatch(ty, field, NodeKind::List, node))
}

// Collection mismatches name the field holding the collection.
fn mismatch(
    ty: &Type,
    field: Option<&FieldDescriptor>,
    expected: NodeKind,
    node: &TreeNode,
) -> Error {
    match field {
        Some(field) => {
            Error::field_shape_mismatch(field.declared_in, field.name, expected, node.kind())
        }
        None => Error::shape_mismatch(ty.to_string(), expected, node.kind()),
    }
}

fn read_object(target: TypeRef, node: &TreeNode) -> Result<Value> {
    let descriptor = target.get();
    let mut fields = Vec::with_capacity(descriptor.fields.len());

    match descriptor.embedding {
        Some(Embedding::OrdinalList) => {
            let Some(items) = node.as_list() else {
                return Err(Error::shape_mismatch(
                    descriptor.name,
                    NodeKind::List,
                    node.kind(),
                ));
            };

            for field in &descriptor.fields {
                if !field.is_retained() {
                    fields.push(Value::Null);
                    continue;
                }

                let Some(at) = field.attrs.at else {
                    return Err(missing_ordinal(field));
                };

                fields.push(deserialize_field(field, items.get(at))?);
            }
        }
        Some(Embedding::KeyedMap) | None => {
            let Some(map) = node.as_map() else {
                return Err(Error::shape_mismatch(
                    descriptor.name,
                    NodeKind::Map,
                    node.kind(),
                ));
            };

            for field in &descriptor.fields {
                if !field.is_retained() {
                    fields.push(Value::Null);
                    continue;
                }

                fields.push(deserialize_field(field, map.get(field.map_key_name()))?);
            }
        }
    }

    Ok(Value::Object(Object::new(target, fields)))
}
