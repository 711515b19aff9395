use crate::{
    Error,
    error::{ObjectSchemaError, ObjectSchemaReason},
    normalize::{NormalizeOptions, normalize_property},
    prelude::*,
};
use std::collections::BTreeMap;

/// Normalize a plain or class-style object definition.
///
/// Class-style input additionally records a non-owning link to the class.
pub fn normalize_object(
    definition: &ObjectDefinition,
    options: &NormalizeOptions,
) -> Result<CanonicalObjectSchema, Error> {
    let mut schema = normalize_object_definition(definition.raw(), options)?;
    schema.constructor = definition.constructor();

    Ok(schema)
}

/// Normalize a plain object definition.
pub fn normalize_object_definition(
    raw: &RawObjectDefinition,
    options: &NormalizeOptions,
) -> Result<CanonicalObjectSchema, Error> {
    let name = raw.name.as_str();
    let fail = |reason| Error::from(ObjectSchemaError::new(name, reason));

    if name.is_empty() {
        return Err(fail(ObjectSchemaReason::EmptyName));
    }

    let properties = raw.properties.to_map(name, options)?;

    if let Some(pk) = &raw.primary_key
        && !properties.contains_key(pk)
    {
        return Err(fail(ObjectSchemaReason::MissingPrimaryKey(pk.clone())));
    }

    if raw.asymmetric && raw.embedded {
        return Err(fail(ObjectSchemaReason::AsymmetricAndEmbedded));
    }

    let properties = properties
        .iter()
        .map(|(prop, definition)| {
            let is_primary_key = raw.primary_key.as_deref() == Some(prop.as_str());
            let canonical = normalize_property(name, prop, definition, is_primary_key)?;

            Ok::<_, Error>((prop.clone(), canonical))
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    tracing::debug!(
        object = name,
        properties = properties.len(),
        primary_key = raw.primary_key.as_deref(),
        "normalized object schema"
    );

    Ok(CanonicalObjectSchema {
        name: name.to_string(),
        primary_key: raw.primary_key.clone(),
        asymmetric: raw.asymmetric,
        embedded: raw.embedded,
        properties,
        constructor: None,
    })
}

///
/// TESTS
///
