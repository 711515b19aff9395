//! Canonical schema nodes.
//!
//! Everything here is fully resolved: no shorthand, no implicit defaults, and
//! optional attributes are either present with a value or absent.

mod object;
mod property;

pub use object::CanonicalObjectSchema;
pub use property::CanonicalPropertySchema;
