//! Scalar conversions between tree nodes and typed values.

use crate::schema::Type;
use crate::tree::{NodeKind, Number};
use crate::{Error, Result, TreeNode, Value};

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// The value an absent or null node reads as: zero or `false` for
/// non-optional primitives, `Null` for everything else.
pub fn absent(ty: &Type) -> Value {
    match ty {
        Type::Bool => Value::Bool(false),
        Type::I8 => Value::I8(0),
        Type::I16 => Value::I16(0),
        Type::I32 => Value::I32(0),
        Type::I64 => Value::I64(0),
        Type::U8 => Value::U8(0),
        Type::U16 => Value::U16(0),
        Type::U32 => Value::U32(0),
        Type::U64 => Value::U64(0),
        Type::F32 => Value::F32(0.0),
        Type::F64 => Value::F64(0.0),
        _ => Value::Null,
    }
}

/// Converts a scalar node to a value of type `ty`.
pub fn from_node(ty: &Type, node: Option<&TreeNode>) -> Result<Value> {
    let node = match node {
        Some(node) if !node.is_null() => node,
        _ => return Ok(absent(ty)),
    };

    match ty {
        Type::Option(inner) => from_node(inner, Some(node)),
        Type::Bool => match node {
            TreeNode::Bool(v) => Ok(Value::Bool(*v)),
            _ => Err(mismatch(ty, NodeKind::Bool, node)),
        },
        ty if ty.is_integer() => match node {
            TreeNode::Number(n) => number_to_integer(ty, *n),
            _ => Err(mismatch(ty, NodeKind::Number, node)),
        },
        Type::F32 => match node {
            TreeNode::Number(n) => Ok(Value::F32(n.as_f64() as f32)),
            _ => Err(mismatch(ty, NodeKind::Number, node)),
        },
        Type::F64 => match node {
            TreeNode::Number(n) => Ok(Value::F64(n.as_f64())),
            _ => Err(mismatch(ty, NodeKind::Number, node)),
        },
        Type::Tree => Ok(Value::Tree(node.clone())),
        Type::String
        | Type::Enum(_)
        | Type::Date
        | Type::DateTime
        | Type::Timestamp
        | Type::Uuid => match node {
            TreeNode::String(text) => from_str(ty, text),
            _ => Err(mismatch(ty, NodeKind::String, node)),
        },
        _ => Err(Error::type_conversion_detail(ty, "not a scalar type")),
    }
}

/// Converts a scalar value to a node. Dates use ISO-8601, enums their
/// variant name, and UUIDs the hyphenated form.
pub fn to_node(value: &Value) -> Result<TreeNode> {
    Ok(match value {
        Value::Null => TreeNode::Null,
        Value::Bool(v) => TreeNode::Bool(*v),
        Value::I8(v) => TreeNode::from(*v),
        Value::I16(v) => TreeNode::from(*v),
        Value::I32(v) => TreeNode::from(*v),
        Value::I64(v) => TreeNode::from(*v),
        Value::U8(v) => TreeNode::from(*v),
        Value::U16(v) => TreeNode::from(*v),
        Value::U32(v) => TreeNode::from(*v),
        Value::U64(v) => TreeNode::from(*v),
        Value::F32(v) => TreeNode::from(*v),
        Value::F64(v) => TreeNode::from(*v),
        Value::String(v) | Value::Enum(v) => TreeNode::String(v.clone()),
        Value::Tree(node) => node.clone(),
        Value::Date(_) | Value::DateTime(_) | Value::Timestamp(_) | Value::Uuid(_) => {
            TreeNode::String(key_string(value)?)
        }
        Value::List(_) | Value::Set(_) | Value::Map(_) | Value::Object(_) => {
            return Err(value.unexpected("scalar"))
        }
    })
}

/// Stringifies a map key.
pub fn key_string(value: &Value) -> Result<String> {
    Ok(match value {
        Value::String(v) | Value::Enum(v) => v.clone(),
        Value::Bool(v) => v.to_string(),
        Value::Uuid(v) => v.hyphenated().to_string(),
        Value::Date(v) => v.format("%Y-%m-%d").to_string(),
        Value::DateTime(v) => v.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        Value::Timestamp(v) => v.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        _ => match value.as_i128() {
            Some(v) => v.to_string(),
            None => return Err(value.unexpected("map key")),
        },
    })
}

/// Parses a map key back into a value of type `ty`.
pub fn from_key(ty: &Type, key: &str) -> Result<Value> {
    match ty {
        Type::Option(inner) => from_key(inner, key),
        Type::Bool => key
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|_| Error::type_conversion_detail(ty, format!("`{key}` is not a bool"))),
        ty if ty.is_integer() => {
            let wide = key.parse::<i128>().map_err(|_| {
                Error::type_conversion_detail(ty, format!("`{key}` is not an integer"))
            })?;
            integer(ty, wide)
        }
        Type::String | Type::Enum(_) | Type::Date | Type::DateTime | Type::Timestamp | Type::Uuid => {
            from_str(ty, key)
        }
        _ => Err(Error::type_conversion_detail(ty, "not a valid map key type")),
    }
}

fn from_str(ty: &Type, text: &str) -> Result<Value> {
    let invalid = |detail: String| Error::type_conversion_detail(ty, detail);

    match ty {
        Type::String => Ok(Value::String(text.to_string())),
        Type::Enum(descriptor) => match descriptor.variant(text) {
            Some(variant) => Ok(Value::Enum(variant.to_string())),
            None => Err(invalid(format!("`{text}` is not a variant of `{}`", descriptor.name))),
        },
        Type::Date => text
            .parse::<NaiveDate>()
            .map(Value::Date)
            .map_err(|e| invalid(format!("`{text}`: {e}"))),
        Type::DateTime => text
            .parse::<NaiveDateTime>()
            .map(Value::DateTime)
            .map_err(|e| invalid(format!("`{text}`: {e}"))),
        Type::Timestamp => text
            .parse::<DateTime<Utc>>()
            .map(Value::Timestamp)
            .map_err(|e| invalid(format!("`{text}`: {e}"))),
        Type::Uuid => Uuid::parse_str(text)
            .map(Value::Uuid)
            .map_err(|e| invalid(format!("`{text}`: {e}"))),
        _ => Err(Error::type_conversion_detail(ty, "not a string type")),
    }
}

fn number_to_integer(ty: &Type, number: Number) -> Result<Value> {
    match number.as_i128() {
        Some(wide) => integer(ty, wide),
        None => Err(Error::type_conversion_detail(
            ty,
            format!("{number} is not an integer"),
        )),
    }
}

fn integer(ty: &Type, wide: i128) -> Result<Value> {
    let value = match ty {
        Type::I8 => i8::try_from(wide).ok().map(Value::I8),
        Type::I16 => i16::try_from(wide).ok().map(Value::I16),
        Type::I32 => i32::try_from(wide).ok().map(Value::I32),
        Type::I64 => i64::try_from(wide).ok().map(Value::I64),
        Type::U8 => u8::try_from(wide).ok().map(Value::U8),
        Type::U16 => u16::try_from(wide).ok().map(Value::U16),
        Type::U32 => u32::try_from(wide).ok().map(Value::U32),
        Type::U64 => u64::try_from(wide).ok().map(Value::U64),
        _ => return Err(Error::type_conversion_detail(ty, "not an integer type")),
    };

    value.ok_or_else(|| Error::type_conversion_detail(ty, format!("{wide} is out of range")))
}

fn mismatch(ty: &Type, expected: NodeKind, node: &TreeNode) -> Error {
    Error::type_conversion(ty, expected, node.kind())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_primitives_are_zero() {
        assert_eq!(from_node(&Type::I32, None).unwrap(), Value::I32(0));
        assert_eq!(from_node(&Type::Bool, Some(&TreeNode::Null)).unwrap(), Value::Bool(false));
        assert_eq!(from_node(&Type::option(Type::I32), None).unwrap(), Value::Null);
        assert_eq!(from_node(&Type::String, None).unwrap(), Value::Null);
    }

    #[test]
    fn integral_float_accepted_for_integer() {
        let node = TreeNode::from(42.0);
        assert_eq!(from_node(&Type::U8, Some(&node)).unwrap(), Value::U8(42));

        let err = from_node(&Type::U8, Some(&TreeNode::from(4.5))).unwrap_err();
        assert!(err.is_type_conversion());
    }

    #[test]
    fn map_keys_round_trip_through_strings() {
        assert_eq!(key_string(&Value::I64(-3)).unwrap(), "-3");
        assert_eq!(from_key(&Type::I64, "-3").unwrap(), Value::I64(-3));
        assert_eq!(from_key(&Type::Bool, "true").unwrap(), Value::Bool(true));
        assert!(key_string(&Value::F64(1.5)).is_err());
    }
}
