//! ## Crate layout
//! - `schema`: the normalization pipeline and the raw/canonical data model.
//! - `config`: `canopy.toml` loading.
//! - `registry`: name-keyed lookup of normalized schemas and their classes.
//!
//! The JSON helpers below are the usual way in for tools: a JSON array of
//! object definitions, where a property given as a string is shorthand and a
//! property given as an object is the explicit form.

pub use canopy_config as config;
pub use canopy_schema as schema;

pub mod error;
pub mod registry;

pub use error::Error;
pub use registry::{RegistryEntry, RegistryError, SchemaRegistry};

use canopy_schema::{NormalizeOptions, normalize_schema};
use prelude::*;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use canopy_schema::{NormalizeOptions, prelude::*};
}

/// Parse a JSON array of plain object definitions.
pub fn load_definitions_json(json: &str) -> Result<Vec<ObjectDefinition>, Error> {
    let raw: Vec<RawObjectDefinition> = serde_json::from_str(json)?;

    Ok(raw.into_iter().map(ObjectDefinition::Plain).collect())
}

/// Parse and normalize a JSON array of object definitions.
pub fn normalize_json(
    json: &str,
    options: &NormalizeOptions,
) -> Result<Vec<CanonicalObjectSchema>, Error> {
    let definitions = load_definitions_json(json)?;

    Ok(normalize_schema(&definitions, options)?)
}

/// Parse, normalize and register a JSON array of object definitions.
pub fn registry_from_json(json: &str, options: &NormalizeOptions) -> Result<SchemaRegistry, Error> {
    let schema = normalize_json(json, options)?;

    Ok(SchemaRegistry::new(schema)?)
}
