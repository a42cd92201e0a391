//! Native handler results → wire value encoding.

use crate::core::value::Value;

/// Types that encode into a wire [`Value`]. The inverse of
/// [`FromValue`](crate::bridge::FromValue) over the supported grammar.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

macro_rules! scalar_to_value {
    ($($ty:ty),+ $(,)?) => {$(
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::from(*self)
            }
        }
    )+};
}

// Non-finite floats have no JSON form; `Value::from` maps them to null.
scalar_to_value!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for &str {
    fn to_value(&self) -> Value {
        Value::String((*self).to_owned())
    }
}

impl ToValue for () {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

/// Raw values pass through untouched, for handlers that build JSON directly.
impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            None => Value::Null,
            Some(inner) => inner.to_value(),
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}
