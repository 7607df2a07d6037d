mod collection;
mod scalar;

use tessera_core::schema::Type;
use tessera_core::{Result, Value};

/// Converts a typed value to and from the dynamic object graph.
///
/// Derive it with `#[derive(Reflect)]` for structs with named fields and
/// fieldless enums. Implementations are provided for the scalar, date,
/// UUID, and collection types fields commonly hold.
pub trait Reflect: Sized {
    /// The declared type of a field holding `Self`.
    fn ty() -> Type;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self>;
}

impl<T: Reflect> Reflect for Option<T> {
    fn ty() -> Type {
        Type::option(T::ty())
    }

    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn ty() -> Type {
        T::ty()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: Value) -> Result<Self> {
        T::from_value(value).map(Box::new)
    }
}
