pub use crate::Reflect;
pub use std::any::{type_name, Any};
pub use std::{default::Default, option::Option, string::String, sync::OnceLock, vec::Vec};
pub use tessera_core::schema::{
    Describe, Embedding, EnumDescriptor, FieldDescriptor, Generator, LifecyclePhase,
    MethodDescriptor, Retention, Type, TypeDescriptor, TypeRef,
};
pub use tessera_core::value::Object;
pub use tessera_core::{Error, Result, Value};

use tessera_core::err;
use std::vec;

/// Checks that `value` is an object of `T` and returns its field values.
pub fn unpack<T: Describe>(value: Value) -> Result<vec::IntoIter<Value>> {
    match value {
        Value::Object(object) => Ok(object.unpack(TypeRef::of::<T>())?.into_iter()),
        value => Err(value.unexpected(T::descriptor().name)),
    }
}

pub fn load_field<T: Reflect>(
    fields: &mut vec::IntoIter<Value>,
    ty: &str,
    name: &str,
) -> Result<T> {
    let value = fields.next().unwrap_or_default();
    T::from_value(value).map_err(|e| e.context(err!("loading field `{ty}.{name}`")))
}

/// Skips the slot of a field that is never persisted.
pub fn skip_field<T: Default>(fields: &mut vec::IntoIter<Value>) -> T {
    fields.next();
    T::default()
}

/// Rebuilds the parent from the remaining, flattened field values.
pub fn load_parent<T: Reflect + Describe>(fields: vec::IntoIter<Value>, ty: &str) -> Result<T> {
    let object = Object::new(TypeRef::of::<T>(), fields.collect());
    T::from_value(Value::Object(object))
        .map_err(|e| e.context(err!("loading parent of `{ty}`")))
}

pub fn object_fields(value: Value) -> Vec<Value> {
    match value {
        Value::Object(object) => object.into_fields(),
        _ => vec![],
    }
}

pub fn variant_name(ty: &str, value: Value) -> Result<String> {
    match value {
        Value::Enum(name) | Value::String(name) => Ok(name),
        value => Err(value.unexpected(ty)),
    }
}

pub fn unknown_variant(ty: &str, name: &str) -> Error {
    Error::type_conversion_detail(ty, format!("`{name}` is not a variant of `{ty}`"))
}
