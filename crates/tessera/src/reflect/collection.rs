use super::Reflect;
use tessera_core::schema::Type;
use tessera_core::{Error, Result, Value};

use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

// Missing collections read as empty.
fn items(value: Value, target: &Type) -> Result<Vec<Value>> {
    match value {
        Value::Null => Ok(vec![]),
        Value::List(items) | Value::Set(items) => Ok(items),
        value => Err(value.unexpected(&target.to_string())),
    }
}

fn entries(value: Value, target: &Type) -> Result<Vec<(Value, Value)>> {
    match value {
        Value::Null => Ok(vec![]),
        Value::Map(entries) => Ok(entries),
        value => Err(value.unexpected(&target.to_string())),
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn ty() -> Type {
        Type::list(T::ty())
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Reflect::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        items(value, &Self::ty())?
            .into_iter()
            .map(T::from_value)
            .collect()
    }
}

macro_rules! impl_reflect_set {
    ( $( $set:ident<T: $($bound:ident),+> ),* ) => {
        $(
            impl<T: Reflect $( + $bound )+> Reflect for $set<T> {
                fn ty() -> Type {
                    Type::set(T::ty())
                }

                fn to_value(&self) -> Value {
                    Value::Set(self.iter().map(Reflect::to_value).collect())
                }

                fn from_value(value: Value) -> Result<Self> {
                    items(value, &Self::ty())?
                        .into_iter()
                        .map(T::from_value)
                        .collect()
                }
            }
        )*
    };
}

impl_reflect_set! {
    HashSet<T: Eq, Hash>,
    BTreeSet<T: Ord>
}

macro_rules! impl_reflect_map {
    ( $( $map:ident<K: $($bound:ident),+> ),* ) => {
        $(
            impl<K: Reflect $( + $bound )+, V: Reflect> Reflect for $map<K, V> {
                fn ty() -> Type {
                    Type::map(K::ty(), V::ty())
                }

                fn to_value(&self) -> Value {
                    Value::Map(
                        self.iter()
                            .map(|(key, value)| (key.to_value(), value.to_value()))
                            .collect(),
                    )
                }

                fn from_value(value: Value) -> Result<Self> {
                    entries(value, &Self::ty())?
                        .into_iter()
                        .map(|(key, value)| Ok::<_, Error>((K::from_value(key)?, V::from_value(value)?)))
                        .collect()
                }
            }
        )*
    };
}

impl_reflect_map! {
    HashMap<K: Eq, Hash>,
    BTreeMap<K: Ord>,
    IndexMap<K: Eq, Hash>
}
