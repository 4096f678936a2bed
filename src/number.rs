use std::str::FromStr;

/// A scalar to be formatted. Integers and floats render differently in the
/// plain band, so the distinction is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    pub fn abs(self) -> f64 {
        self.as_f64().abs()
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    /// Multiplies by an integer factor. Integers stay integers unless the
    /// product overflows.
    pub fn scale(self, factor: i128) -> Number {
        match self {
            Number::Int(n) => n
                .checked_mul(factor)
                .map_or(Number::Float(n as f64 * factor as f64), Number::Int),
            Number::Float(f) => Number::Float(f * factor as f64),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(n: $t) -> Self {
                Number::Int(n as i128)
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<f32> for Number {
    fn from(f: f32) -> Self {
        Number::Float(f as f64)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid number: {token:?}")]
pub struct ParseNumberError {
    pub token: String,
}

impl FromStr for Number {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().replace('_', "");
        if let Ok(n) = token.parse::<i128>() {
            return Ok(Number::Int(n));
        }
        token.parse::<f64>().map(Number::Float).map_err(|_| ParseNumberError {
            token: s.to_string(),
        })
    }
}

/// Input to `fmt`: a scalar or an arbitrarily nested sequence of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Number),
    Sequence(Vec<Value>),
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Scalar(n)
    }
}

macro_rules! impl_value_from_scalar {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Scalar(n.into())
            }
        })*
    };
}

impl_value_from_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::Sequence(items.iter().cloned().map(Into::into).collect())
    }
}
