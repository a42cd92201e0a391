//! Wire value → native parameter decoding.

use thiserror::Error;

use crate::core::value::Value;

/// Why a wire value did not decode into the target type. The `Display` form
/// leads with the kind name; adapters embed it in the
/// "Invalid parameters: ..." tool result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("InvalidType: expected {expected}")]
    InvalidType { expected: &'static str },

    /// Right variant, unrepresentable value: a fractional float offered to an
    /// integer, or a number outside the target's range.
    #[error("InvalidValue")]
    InvalidValue,

    #[error("InvalidLength: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("MissingField({0})")]
    MissingField(&'static str),
}

impl DecodeError {
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::InvalidType { .. } => "InvalidType",
            DecodeError::InvalidValue => "InvalidValue",
            DecodeError::InvalidLength { .. } => "InvalidLength",
            DecodeError::MissingField(_) => "MissingField",
        }
    }
}

/// Types that decode from a wire [`Value`].
pub trait FromValue: Sized {
    fn from_value(v: &Value) -> Result<Self, DecodeError>;

    /// What a struct field of this type decodes to when its key is missing
    /// and no default is declared. `None` means the field is mandatory.
    fn absent() -> Option<Self> {
        None
    }
}

impl FromValue for bool {
    fn from_value(v: &Value) -> Result<Self, DecodeError> {
        v.as_bool().ok_or(DecodeError::InvalidType { expected: "boolean" })
    }
}

impl FromValue for String {
    fn from_value(v: &Value) -> Result<Self, DecodeError> {
        v.as_str().map(|s| s.to_owned()).ok_or(DecodeError::InvalidType { expected: "string" })
    }
}

macro_rules! int_from_value {
    ($($ty:ty),+ $(,)?) => {$(
        impl FromValue for $ty {
            fn from_value(v: &Value) -> Result<Self, DecodeError> {
                let n = match v {
                    Value::Number(n) => n,
                    _ => return Err(DecodeError::InvalidType { expected: "integer" }),
                };
                if let Some(i) = n.as_i64() {
                    return <$ty>::try_from(i).map_err(|_| DecodeError::InvalidValue);
                }
                if let Some(u) = n.as_u64() {
                    return <$ty>::try_from(u).map_err(|_| DecodeError::InvalidValue);
                }
                // Whole-valued floats are accepted when they fit the target.
                // Bounds are compared in i128: casting MAX to f64 rounds up
                // at the 64-bit edge and would admit one-past-the-end values.
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => {
                        let wide = f as i128;
                        if wide >= <$ty>::MIN as i128 && wide <= <$ty>::MAX as i128 {
                            Ok(wide as $ty)
                        } else {
                            Err(DecodeError::InvalidValue)
                        }
                    }
                    _ => Err(DecodeError::InvalidValue),
                }
            }
        }
    )+};
}

int_from_value!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromValue for f64 {
    fn from_value(v: &Value) -> Result<Self, DecodeError> {
        match v {
            Value::Number(n) => n.as_f64().ok_or(DecodeError::InvalidValue),
            _ => Err(DecodeError::InvalidType { expected: "number" }),
        }
    }
}

impl FromValue for f32 {
    fn from_value(v: &Value) -> Result<Self, DecodeError> {
        f64::from_value(v).map(|f| f as f32)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(v: &Value) -> Result<Self, DecodeError> {
        if v.is_null() {
            Ok(None)
        } else {
            T::from_value(v).map(Some)
        }
    }

    fn absent() -> Option<Self> {
        Some(None)
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(v: &Value) -> Result<Self, DecodeError> {
        match v {
            Value::Array(items) => items.iter().map(T::from_value).collect(),
            _ => Err(DecodeError::InvalidType { expected: "array" }),
        }
    }
}

impl<T: FromValue, const N: usize> FromValue for [T; N] {
    fn from_value(v: &Value) -> Result<Self, DecodeError> {
        let items = v.as_array().ok_or(DecodeError::InvalidType { expected: "array" })?;
        if items.len() != N {
            return Err(DecodeError::InvalidLength { expected: N, got: items.len() });
        }
        let decoded: Vec<T> = items.iter().map(T::from_value).collect::<Result<_, _>>()?;
        decoded
            .try_into()
            .map_err(|_| DecodeError::InvalidLength { expected: N, got: N })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_accept_whole_floats_only() {
        assert_eq!(i32::from_value(&json!(3)), Ok(3));
        assert_eq!(i32::from_value(&json!(3.0)), Ok(3));
        assert_eq!(i32::from_value(&json!(3.5)), Err(DecodeError::InvalidValue));
        assert_eq!(i32::from_value(&json!(1e20)), Err(DecodeError::InvalidValue));
        assert_eq!(
            i32::from_value(&json!("3")),
            Err(DecodeError::InvalidType { expected: "integer" })
        );
    }

    #[test]
    fn integers_respect_width_and_signedness() {
        assert_eq!(u8::from_value(&json!(255)), Ok(255));
        assert_eq!(u8::from_value(&json!(256)), Err(DecodeError::InvalidValue));
        assert_eq!(u32::from_value(&json!(-1)), Err(DecodeError::InvalidValue));
        assert_eq!(i64::from_value(&json!(u64::MAX)), Err(DecodeError::InvalidValue));
    }

    #[test]
    fn integer_bounds_are_exact_at_the_64_bit_edge() {
        // 2^63 rounds to the same f64 as i64::MAX casts to, but is out of range
        assert_eq!(
            i64::from_value(&json!(9_223_372_036_854_775_808.0_f64)),
            Err(DecodeError::InvalidValue)
        );
        assert_eq!(
            u64::from_value(&json!(18_446_744_073_709_551_616.0_f64)),
            Err(DecodeError::InvalidValue)
        );
        // -2^63 is exactly representable and is i64::MIN
        assert_eq!(
            i64::from_value(&json!(-9_223_372_036_854_775_808.0_f64)),
            Ok(i64::MIN)
        );
    }

    #[test]
    fn floats_widen_integers_exactly() {
        assert_eq!(f64::from_value(&json!(7)), Ok(7.0));
        assert_eq!(f64::from_value(&json!(0.5)), Ok(0.5));
        assert_eq!(
            f64::from_value(&json!(true)),
            Err(DecodeError::InvalidType { expected: "number" })
        );
    }

    #[test]
    fn option_maps_null_to_none_and_recurses_otherwise() {
        assert_eq!(Option::<String>::from_value(&json!(null)), Ok(None));
        assert_eq!(Option::<String>::from_value(&json!("x")), Ok(Some("x".to_string())));
        assert_eq!(
            Option::<String>::from_value(&json!(1)),
            Err(DecodeError::InvalidType { expected: "string" })
        );
    }

    #[test]
    fn fixed_arrays_require_exact_length() {
        assert_eq!(<[u8; 3]>::from_value(&json!([1, 2, 3])), Ok([1, 2, 3]));
        assert_eq!(
            <[u8; 3]>::from_value(&json!([1, 2])),
            Err(DecodeError::InvalidLength { expected: 3, got: 2 })
        );
    }

    #[test]
    fn vectors_take_any_length() {
        assert_eq!(Vec::<bool>::from_value(&json!([true, false])), Ok(vec![true, false]));
        assert_eq!(Vec::<bool>::from_value(&json!([])), Ok(vec![]));
    }

    #[test]
    fn error_kinds_name_themselves() {
        assert_eq!(DecodeError::InvalidValue.kind(), "InvalidValue");
        assert_eq!(DecodeError::MissingField("f").kind(), "MissingField");
        assert_eq!(DecodeError::MissingField("f").to_string(), "MissingField(f)");
    }
}
