use super::{EnumDescriptor, TypeRef};
use std::fmt;

/// The declared type of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,

    /// Calendar date without time zone
    Date,

    /// Date and time without time zone
    DateTime,

    /// Instant in UTC
    Timestamp,

    Uuid,

    /// Fieldless enumeration, converted by variant name
    Enum(&'static EnumDescriptor),

    Option(Box<Type>),
    List(Box<Type>),
    Set(Box<Type>),
    Map(Box<Type>, Box<Type>),

    /// Free-form document
    Tree,

    /// A described structured type
    Struct(TypeRef),

    /// A handle to a type descriptor. Never persisted.
    Descriptor,

    /// A payload that cannot be reflected, identified by its Rust type name.
    /// Never persisted.
    Opaque(&'static str),
}

impl Type {
    pub fn option(inner: Type) -> Type {
        Type::Option(Box::new(inner))
    }

    pub fn list(item: Type) -> Type {
        Type::List(Box::new(item))
    }

    pub fn set(item: Type) -> Type {
        Type::Set(Box::new(item))
    }

    pub fn map(key: Type, value: Type) -> Type {
        Type::Map(Box::new(key), Box::new(value))
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Type::I8
                | Type::I16
                | Type::I32
                | Type::I64
                | Type::U8
                | Type::U16
                | Type::U32
                | Type::U64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Type::F32 | Type::F64)
    }

    /// Non-optional primitives: absent values read back as zero or `false`.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Bool) || self.is_integer() || self.is_float()
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Type::Date | Type::DateTime | Type::Timestamp)
    }

    pub fn is_option(&self) -> bool {
        matches!(self, Type::Option(_))
    }

    /// Types whose fields are never persisted nor serialized.
    pub fn is_excluded(&self) -> bool {
        matches!(self, Type::Descriptor | Type::Opaque(_))
    }

    /// Strips any number of `Option` layers.
    pub fn unwrap_option(&self) -> &Type {
        match self {
            Type::Option(inner) => inner.unwrap_option(),
            ty => ty,
        }
    }

    pub fn as_struct(&self) -> Option<TypeRef> {
        match self {
            Type::Struct(ty) => Some(*ty),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => f.write_str("bool"),
            Type::I8 => f.write_str("i8"),
            Type::I16 => f.write_str("i16"),
            Type::I32 => f.write_str("i32"),
            Type::I64 => f.write_str("i64"),
            Type::U8 => f.write_str("u8"),
            Type::U16 => f.write_str("u16"),
            Type::U32 => f.write_str("u32"),
            Type::U64 => f.write_str("u64"),
            Type::F32 => f.write_str("f32"),
            Type::F64 => f.write_str("f64"),
            Type::String => f.write_str("String"),
            Type::Date => f.write_str("NaiveDate"),
            Type::DateTime => f.write_str("NaiveDateTime"),
            Type::Timestamp => f.write_str("DateTime<Utc>"),
            Type::Uuid => f.write_str("Uuid"),
            Type::Enum(e) => f.write_str(e.name),
            Type::Option(inner) => write!(f, "Option<{inner}>"),
            Type::List(item) => write!(f, "Vec<{item}>"),
            Type::Set(item) => write!(f, "Set<{item}>"),
            Type::Map(key, value) => write!(f, "Map<{key}, {value}>"),
            Type::Tree => f.write_str("TreeNode"),
            Type::Struct(ty) => f.write_str(ty.name()),
            Type::Descriptor => f.write_str("TypeDescriptor"),
            Type::Opaque(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwrap_nested_options() {
        let ty = Type::option(Type::option(Type::I64));
        assert_eq!(ty.unwrap_option(), &Type::I64);
        assert_eq!(ty.to_string(), "Option<Option<i64>>");
    }

    #[test]
    fn classification() {
        assert!(Type::U16.is_primitive());
        assert!(Type::Bool.is_primitive());
        assert!(!Type::option(Type::I32).is_primitive());
        assert!(!Type::String.is_primitive());
        assert!(Type::Opaque("Cache").is_excluded());
        assert!(Type::Timestamp.is_date());
    }
}
