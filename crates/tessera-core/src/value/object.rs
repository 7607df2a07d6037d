use super::Value;
use crate::schema::{TypeDescriptor, TypeRef};
use crate::{Error, Result};

/// An instance of a described structured type.
///
/// `fields` is aligned with the descriptor's flattened field list: own
/// fields first, then each ancestor's. Fields excluded from persistence
/// still occupy their slot, holding `Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    ty: TypeRef,
    fields: Vec<Value>,
}

impl Object {
    pub fn new(ty: TypeRef, fields: Vec<Value>) -> Object {
        Object { ty, fields }
    }

    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.ty.get()
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.fields.get(index)
    }

    /// Looks up a field value by name. A field declared on the type itself
    /// shadows an ancestor field with the same name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        let field = self.descriptor().field(name)?;
        self.fields.get(field.index)
    }

    pub fn into_fields(self) -> Vec<Value> {
        self.fields
    }

    /// Consumes the object, checking that it is an instance of `ty` with one
    /// value per descriptor field.
    pub fn unpack(self, ty: TypeRef) -> Result<Vec<Value>> {
        if self.ty != ty {
            return Err(Error::type_conversion_detail(
                ty.name(),
                format!("found object of type `{}`", self.ty.name()),
            ));
        }

        let expected = ty.get().fields.len();
        if self.fields.len() != expected {
            return Err(Error::configuration(format!(
                "object of type `{}` has {} values for {} fields",
                ty.name(),
                self.fields.len(),
                expected
            )));
        }

        Ok(self.fields)
    }
}
