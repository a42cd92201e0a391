//! JSON Schema derivation, one impl per supported parameter type.

use serde_json::json;

use crate::core::value::Value;

/// Types that can describe themselves as a JSON Schema fragment.
pub trait Schematize {
    fn schema() -> Value;

    /// Whether a struct field of this type may be omitted from `required`.
    /// Only `Option<T>` overrides this.
    fn optional() -> bool {
        false
    }
}

macro_rules! leaf_schema {
    ($json_ty:literal => $($ty:ty),+ $(,)?) => {$(
        impl Schematize for $ty {
            fn schema() -> Value {
                json!({"type": $json_ty})
            }
        }
    )+};
}

leaf_schema!("boolean" => bool);
leaf_schema!("integer" => i8, i16, i32, i64, u8, u16, u32, u64);
leaf_schema!("number" => f32, f64);
leaf_schema!("string" => String);

impl<T: Schematize> Schematize for Option<T> {
    /// The inner schema with its `type` widened to include `"null"`.
    fn schema() -> Value {
        let mut schema = T::schema();
        if let Some(obj) = schema.as_object_mut() {
            let widened = match obj.get("type") {
                Some(Value::String(ty)) => json!(["null", ty]),
                Some(Value::Array(types)) => {
                    let mut types = types.clone();
                    if !types.iter().any(|t| t == "null") {
                        types.insert(0, Value::String("null".into()));
                    }
                    Value::Array(types)
                }
                _ => json!("null"),
            };
            obj.insert("type".into(), widened);
        }
        schema
    }

    fn optional() -> bool {
        true
    }
}

impl<T: Schematize> Schematize for Vec<T> {
    fn schema() -> Value {
        json!({"type": "array", "items": T::schema()})
    }
}

impl<T: Schematize, const N: usize> Schematize for [T; N] {
    fn schema() -> Value {
        json!({"type": "array", "items": T::schema(), "minItems": N, "maxItems": N})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_map_to_their_json_types() {
        assert_eq!(bool::schema(), json!({"type": "boolean"}));
        assert_eq!(u32::schema(), json!({"type": "integer"}));
        assert_eq!(f64::schema(), json!({"type": "number"}));
        assert_eq!(String::schema(), json!({"type": "string"}));
    }

    #[test]
    fn option_widens_type_to_include_null() {
        assert_eq!(Option::<String>::schema(), json!({"type": ["null", "string"]}));
        assert!(Option::<String>::optional());
        assert!(!String::optional());
    }

    #[test]
    fn nested_option_does_not_duplicate_null() {
        assert_eq!(Option::<Option<u8>>::schema(), json!({"type": ["null", "integer"]}));
    }

    #[test]
    fn fixed_arrays_carry_their_length_bounds() {
        assert_eq!(
            <[f64; 3]>::schema(),
            json!({"type": "array", "items": {"type": "number"}, "minItems": 3, "maxItems": 3})
        );
    }

    #[test]
    fn vectors_are_unbounded_arrays() {
        assert_eq!(
            Vec::<String>::schema(),
            json!({"type": "array", "items": {"type": "string"}})
        );
    }
}
