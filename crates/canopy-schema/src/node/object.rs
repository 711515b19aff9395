use crate::prelude::*;
use std::collections::BTreeMap;

///
/// CanonicalObjectSchema
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalObjectSchema {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,

    pub asymmetric: bool,
    pub embedded: bool,
    pub properties: BTreeMap<String, CanonicalPropertySchema>,

    #[serde(skip)]
    pub constructor: Option<ConstructorRef>,
}

impl CanonicalObjectSchema {
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&CanonicalPropertySchema> {
        self.properties.get(property)
    }

    /// Return the primary key property if one is declared.
    #[must_use]
    pub fn primary_key_property(&self) -> Option<&CanonicalPropertySchema> {
        self.primary_key.as_deref().and_then(|pk| self.get(pk))
    }

    /// Explicit raw definition that normalizes back to this schema.
    ///
    /// The constructor link is not part of the raw form.
    #[must_use]
    pub fn to_raw(&self) -> RawObjectDefinition {
        RawObjectDefinition {
            name: self.name.clone(),
            primary_key: self.primary_key.clone(),
            asymmetric: self.asymmetric,
            embedded: self.embedded,
            properties: RawProperties::Map(
                self.properties
                    .iter()
                    .map(|(name, prop)| {
                        (name.clone(), RawPropertyDefinition::Explicit(prop.to_raw()))
                    })
                    .collect(),
            ),
        }
    }

    /// Object types referenced by this schema's relationship properties.
    pub fn linked_object_types(&self) -> impl Iterator<Item = &str> {
        self.properties
            .values()
            .filter(|p| p.is_relationship())
            .filter_map(|p| p.object_type.as_deref())
    }
}
