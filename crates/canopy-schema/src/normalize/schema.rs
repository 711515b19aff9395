use crate::{
    Error,
    normalize::{NormalizeOptions, normalize_object},
    prelude::*,
};

/// Normalize every object definition, preserving input order.
pub fn normalize_schema(
    definitions: &[ObjectDefinition],
    options: &NormalizeOptions,
) -> Result<Vec<CanonicalObjectSchema>, Error> {
    let schema = definitions
        .iter()
        .map(|definition| normalize_object(definition, options))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(objects = schema.len(), "normalized schema");

    Ok(schema)
}

///
/// TESTS
///
