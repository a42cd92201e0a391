//! The `tool_params!` macro: declares a parameter struct and derives the
//! three bridge traits for it in one place.

/// Declares a tool parameter struct and implements
/// [`Schematize`](crate::bridge::Schematize),
/// [`FromValue`](crate::bridge::FromValue), and
/// [`ToValue`](crate::bridge::ToValue) for it.
///
/// Fields may declare a default with `field: T = expr`; defaulted fields are
/// excluded from the schema's `required` list and filled in when the key is
/// missing from the arguments. `Option<T>` fields decode to `None` when
/// missing. Any other missing field fails with `MissingField`. Extra keys in
/// the arguments are ignored. Schema property order and encode key order
/// follow declaration order.
///
/// ```rust
/// use typed_mcp::tool_params;
///
/// tool_params! {
///     /// Arguments for a text search.
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct SearchParams {
///         query: String,
///         limit: u32 = 10,
///         fuzzy: Option<bool>,
///     }
/// }
/// ```
#[macro_export]
macro_rules! tool_params {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fname:ident : $fty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $fname: $fty,
            )*
        }

        impl $crate::bridge::Schematize for $name {
            fn schema() -> $crate::core::value::Value {
                #[allow(unused_mut)]
                let mut properties = $crate::__serde_json::Map::new();
                #[allow(unused_mut)]
                let mut required: ::std::vec::Vec<$crate::core::value::Value> =
                    ::std::vec::Vec::new();
                $(
                    properties.insert(
                        ::std::string::String::from(stringify!($fname)),
                        <$fty as $crate::bridge::Schematize>::schema(),
                    );
                    $crate::tool_params!(@required required, $fname, $fty $(= $default)?);
                )*
                let mut schema = $crate::__serde_json::Map::new();
                schema.insert(
                    ::std::string::String::from("type"),
                    $crate::core::value::Value::String(::std::string::String::from("object")),
                );
                schema.insert(
                    ::std::string::String::from("properties"),
                    $crate::core::value::Value::Object(properties),
                );
                if !required.is_empty() {
                    schema.insert(
                        ::std::string::String::from("required"),
                        $crate::core::value::Value::Array(required),
                    );
                }
                $crate::core::value::Value::Object(schema)
            }
        }

        impl $crate::bridge::ToolParams for $name {}

        impl $crate::bridge::FromValue for $name {
            fn from_value(
                v: &$crate::core::value::Value,
            ) -> ::std::result::Result<Self, $crate::bridge::DecodeError> {
                #[allow(unused_variables)]
                let obj = v
                    .as_object()
                    .ok_or($crate::bridge::DecodeError::InvalidType { expected: "object" })?;
                ::std::result::Result::Ok(Self {
                    $(
                        $fname: match obj.get(stringify!($fname)) {
                            ::std::option::Option::Some(field) => {
                                <$fty as $crate::bridge::FromValue>::from_value(field)?
                            }
                            ::std::option::Option::None => {
                                $crate::tool_params!(@absent $fname : $fty $(= $default)?)
                            }
                        },
                    )*
                })
            }
        }

        impl $crate::bridge::ToValue for $name {
            fn to_value(&self) -> $crate::core::value::Value {
                #[allow(unused_mut)]
                let mut obj = $crate::__serde_json::Map::new();
                $(
                    obj.insert(
                        ::std::string::String::from(stringify!($fname)),
                        $crate::bridge::ToValue::to_value(&self.$fname),
                    );
                )*
                $crate::core::value::Value::Object(obj)
            }
        }
    };

    // A field with a default is never listed as required.
    (@required $required:ident, $fname:ident, $fty:ty = $default:expr) => {};
    (@required $required:ident, $fname:ident, $fty:ty) => {
        if !<$fty as $crate::bridge::Schematize>::optional() {
            $required.push($crate::core::value::Value::String(
                ::std::string::String::from(stringify!($fname)),
            ));
        }
    };

    (@absent $fname:ident : $fty:ty = $default:expr) => {
        $default
    };
    (@absent $fname:ident : $fty:ty) => {
        <$fty as $crate::bridge::FromValue>::absent().ok_or(
            $crate::bridge::DecodeError::MissingField(stringify!($fname)),
        )?
    };
}
