//! Raw definitions in, canonical schemas out.
//!
//! Objects are validated first, then each property is normalized either from
//! its shorthand string or from its explicit object form. Both paths share the
//! type classifier and the implicit optionality rules. The first violation
//! aborts the call.

mod object;
pub mod optionality;
mod property;
mod schema;

pub use object::{normalize_object, normalize_object_definition};
pub use property::normalize_property;
pub use schema::normalize_schema;

///
/// NormalizeOptions
///
/// Injected settings; normalization reads no ambient state.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NormalizeOptions {
    /// Accept the deprecated array-of-properties shape and rewrite it into a
    /// mapping. Rejected when false.
    pub allow_values_arrays: bool,
}
