//! The type bridge: binds a handler's native parameter and result types to
//! the dynamic JSON wire surface.
//!
//! Three operations, each specialized per type through trait impls resolved
//! at compile time (no runtime reflection):
//!
//! - [`Schematize`] derives a JSON Schema fragment for a type,
//! - [`FromValue`] decodes a wire [`Value`](crate::Value) into the type,
//! - [`ToValue`] encodes a handler result back into a wire value.
//!
//! Leaf impls cover `bool`, the fixed-width integers, `f32`/`f64`, `String`,
//! `Option<T>`, `Vec<T>`, and `[T; N]`. Parameter structs get all three via
//! the [`tool_params!`](crate::tool_params) macro, which also supports
//! per-field defaults spelled `field: T = expr`. Wiring an unsupported type
//! into an adapter fails compilation with an unsatisfied-bound diagnostic
//! naming the type.

pub mod decode;
pub mod encode;
pub mod schema;

mod params;

pub use decode::{DecodeError, FromValue};
pub use encode::ToValue;
pub use schema::Schematize;

/// Marker for types usable as a handler's top-level parameter. Implemented
/// only by [`tool_params!`](crate::tool_params) structs; scalars and
/// containers deliberately do not qualify, so a handler whose parameter is
/// not a parameter struct fails to compile.
pub trait ToolParams: Schematize + FromValue {}
