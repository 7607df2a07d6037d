use super::Value;
use crate::{Error, Result};

macro_rules! impl_num {
    ( $( $variant:ident($ty:ty) )* ) => {
        impl Value {
            /// Widens any integer variant to `i128`.
            pub fn as_i128(&self) -> Option<i128> {
                match *self {
                    $( Value::$variant(v) => Some(i128::from(v)), )*
                    _ => None,
                }
            }

            pub fn is_integer(&self) -> bool {
                self.as_i128().is_some()
            }
        }

        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<&$ty> for Value {
                fn from(value: &$ty) -> Self {
                    Self::$variant(*value)
                }
            }

            // Accepts every integer variant, range-checked.
            impl TryFrom<Value> for $ty {
                type Error = Error;

                fn try_from(value: Value) -> Result<Self> {
                    let Some(wide) = value.as_i128() else {
                        return Err(value.unexpected(stringify!($ty)));
                    };

                    <$ty>::try_from(wide).map_err(|_| {
                        Error::type_conversion_detail(
                            stringify!($ty),
                            format!("{wide} is out of range"),
                        )
                    })
                }
            }
        )*
    };
}

impl_num! {
    I8(i8)
    I16(i16)
    I32(i32)
    I64(i64)
    U8(u8)
    U16(u16)
    U32(u32)
    U64(u64)
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::F32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            Value::F32(v) => Ok(f64::from(v)),
            _ => match value.as_i128() {
                Some(v) => Ok(v as f64),
                None => Err(value.unexpected("f64")),
            },
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::F32(v) => Ok(v),
            Value::F64(v) => Ok(v as f32),
            _ => match value.as_i128() {
                Some(v) => Ok(v as f32),
                None => Err(value.unexpected("f32")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_width_conversion() {
        assert_eq!(u8::try_from(Value::I64(200)).unwrap(), 200u8);
        assert_eq!(i64::try_from(Value::U16(7)).unwrap(), 7i64);
    }

    #[test]
    fn out_of_range_is_type_conversion() {
        let err = u8::try_from(Value::I32(300)).unwrap_err();
        assert!(err.is_type_conversion());
        assert_eq!(err.to_string(), "cannot convert to u8: 300 is out of range");
    }

    #[test]
    fn integers_widen_to_floats() {
        assert_eq!(f64::try_from(Value::I32(3)).unwrap(), 3.0);
        assert!(f64::try_from(Value::from("3")).is_err());
    }
}
