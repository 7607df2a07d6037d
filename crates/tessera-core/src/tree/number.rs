/// A numeric tree node.
///
/// Non-negative integers that fit in `i64` are always stored as `I64`, so two
/// numbers compare equal regardless of whether they were built from a signed
/// or unsigned source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    /// Returns the number as an integer if it has no fractional part.
    pub fn as_i128(self) -> Option<i128> {
        match self {
            Number::I64(v) => Some(i128::from(v)),
            Number::U64(v) => Some(i128::from(v)),
            // Integral floats inside the i128 range
            Number::F64(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1.7e38 => {
                Some(v as i128)
            }
            Number::F64(_) => None,
        }
    }

    pub fn as_i64(self) -> Option<i64> {
        self.as_i128().and_then(|v| i64::try_from(v).ok())
    }

    pub fn as_u64(self) -> Option<u64> {
        self.as_i128().and_then(|v| u64::try_from(v).ok())
    }

    /// Widens to `f64`. Large integers may lose precision.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::I64(v) => v as f64,
            Number::U64(v) => v as f64,
            Number::F64(v) => v,
        }
    }

    pub fn is_integer(self) -> bool {
        !matches!(self, Number::F64(_))
    }
}

macro_rules! impl_from_lossless {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::I64(i64::from(value))
                }
            }
        )*
    };
}

impl_from_lossless!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Number::I64(v),
            Err(_) => Number::U64(value),
        }
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::F64(f64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::F64(value)
    }
}

impl core::fmt::Display for Number {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Number::I64(v) => write!(f, "{v}"),
            Number::U64(v) => write!(f, "{v}"),
            Number::F64(v) => write!(f, "{v}"),
        }
    }
}
