use super::Type;
use crate::embed::DateFormat;

/// Describes one field of a structured type.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// The field name
    pub name: &'static str,

    /// Declared type
    pub ty: Type,

    pub retention: Retention,

    /// Persistence and serialization markers
    pub attrs: FieldAttrs,

    /// Name of the type that declares the field. Differs from the described
    /// type for inherited fields.
    pub declared_in: &'static str,

    /// Position in the owning descriptor's flattened field list
    pub index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FieldAttrs {
    /// Set if the field is part of the type's identity
    pub key: Option<Generator>,

    /// Explicit column names
    pub columns: Vec<&'static str>,

    /// The field joins to another entity
    pub relation: bool,

    /// The field is stored as a serialized tree document
    pub embedded: bool,

    /// Date format used when converting to and from a string
    pub format: Option<DateFormat>,

    /// Position of the field within an ordinal-list layout
    pub at: Option<usize>,

    /// Key overriding the field name within a keyed-map layout
    pub map_key: Option<&'static str>,
}

/// How an identity field gets its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    /// Supplied by the caller
    Assigned,

    /// Assigned by the store on insert
    AutoIncrement,
}

/// Whether a field takes part in persistence and serialization at all.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    #[default]
    Persisted,
    Transient,
    Static,

    /// Compiler- or macro-introduced member with no user meaning
    Synthetic,
}

impl FieldDescriptor {
    pub fn new(name: &'static str, ty: Type) -> FieldDescriptor {
        FieldDescriptor {
            name,
            ty,
            retention: Retention::Persisted,
            attrs: FieldAttrs::default(),
            declared_in: "",
            index: 0,
        }
    }

    pub fn key(mut self, generator: Generator) -> Self {
        self.attrs.key = Some(generator);
        self
    }

    pub fn columns(mut self, columns: &[&'static str]) -> Self {
        self.attrs.columns = columns.to_vec();
        self
    }

    pub fn relation(mut self) -> Self {
        self.attrs.relation = true;
        self
    }

    pub fn embedded(mut self) -> Self {
        self.attrs.embedded = true;
        self
    }

    pub fn format(mut self, pattern: &str) -> Self {
        self.attrs.format = Some(DateFormat::new(pattern));
        self
    }

    pub fn at(mut self, index: usize) -> Self {
        self.attrs.at = Some(index);
        self
    }

    pub fn map_key(mut self, key: &'static str) -> Self {
        self.attrs.map_key = Some(key);
        self
    }

    pub fn retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    pub fn is_key(&self) -> bool {
        self.attrs.key.is_some()
    }

    /// True for auto-increment keys of an integral (possibly optional) type.
    pub fn is_generated_key(&self) -> bool {
        self.attrs.key == Some(Generator::AutoIncrement) && self.ty.unwrap_option().is_integer()
    }

    pub fn is_relation(&self) -> bool {
        self.attrs.relation
    }

    pub fn is_embedded(&self) -> bool {
        self.attrs.embedded
    }

    /// False for transient, static, and synthetic members, and for fields
    /// whose type can never be persisted.
    pub fn is_retained(&self) -> bool {
        self.retention == Retention::Persisted && !self.ty.is_excluded()
    }

    /// Key under which the field is stored in a keyed-map layout.
    pub fn map_key_name(&self) -> &'static str {
        self.attrs.map_key.unwrap_or(self.name)
    }

    /// `Type.field`, for diagnostics.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.declared_in, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_requires_integral_type() {
        let id = FieldDescriptor::new("id", Type::option(Type::I64)).key(Generator::AutoIncrement);
        assert!(id.is_generated_key());

        let code = FieldDescriptor::new("code", Type::String).key(Generator::AutoIncrement);
        assert!(code.is_key());
        assert!(!code.is_generated_key());

        let assigned = FieldDescriptor::new("id", Type::I64).key(Generator::Assigned);
        assert!(!assigned.is_generated_key());
    }

    #[test]
    fn retention() {
        assert!(FieldDescriptor::new("name", Type::String).is_retained());
        assert!(!FieldDescriptor::new("scratch", Type::I32)
            .retention(Retention::Transient)
            .is_retained());
        assert!(!FieldDescriptor::new("cache", Type::Opaque("Cache")).is_retained());
        assert!(!FieldDescriptor::new("meta", Type::Descriptor).is_retained());
    }
}
