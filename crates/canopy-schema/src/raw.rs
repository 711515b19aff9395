use crate::{
    error::{ObjectSchemaError, ObjectSchemaReason},
    normalize::NormalizeOptions,
    prelude::*,
};
use std::{borrow::Cow, collections::BTreeMap};

///
/// RawObjectDefinition
///
/// An object schema exactly as authored. Nothing is checked at this layer.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawObjectDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub asymmetric: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub embedded: bool,

    #[serde(default)]
    pub properties: RawProperties,
}

impl RawObjectDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = Some(name.into());
        self
    }

    #[must_use]
    pub const fn asymmetric(mut self, asymmetric: bool) -> Self {
        self.asymmetric = asymmetric;
        self
    }

    #[must_use]
    pub const fn embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    /// Add a property to the mapping shape.
    ///
    /// A values array already present is folded into the mapping first.
    #[must_use]
    pub fn property(
        mut self,
        name: impl Into<String>,
        definition: impl Into<RawPropertyDefinition>,
    ) -> Self {
        let mut map = match std::mem::take(&mut self.properties) {
            RawProperties::Map(map) => map,
            RawProperties::Values(values) => values
                .into_iter()
                .map(|v| (v.name, RawPropertyDefinition::Explicit(v.definition)))
                .collect(),
        };
        map.insert(name.into(), definition.into());
        self.properties = RawProperties::Map(map);

        self
    }
}

///
/// RawProperties
///
/// Either the mapping shape, or the deprecated array of named property objects.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawProperties {
    Map(BTreeMap<String, RawPropertyDefinition>),
    Values(Vec<RawNamedProperty>),
}

impl Default for RawProperties {
    fn default() -> Self {
        Self::Map(BTreeMap::new())
    }
}

impl RawProperties {
    /// Resolve to the mapping shape, rewriting a values array when allowed.
    pub(crate) fn to_map<'a>(
        &'a self,
        object: &str,
        options: &NormalizeOptions,
    ) -> Result<Cow<'a, BTreeMap<String, RawPropertyDefinition>>, ObjectSchemaError> {
        let values = match self {
            Self::Map(map) => return Ok(Cow::Borrowed(map)),
            Self::Values(values) => values,
        };

        if !options.allow_values_arrays {
            return Err(ObjectSchemaError::new(
                object,
                ObjectSchemaReason::ValuesArrayDisabled,
            ));
        }

        tracing::warn!(
            object,
            count = values.len(),
            "rewriting deprecated 'properties' array into a mapping"
        );

        let mut map = BTreeMap::new();
        for value in values {
            let previous = map.insert(
                value.name.clone(),
                RawPropertyDefinition::Explicit(value.definition.clone()),
            );
            if previous.is_some() {
                return Err(ObjectSchemaError::new(
                    object,
                    ObjectSchemaReason::DuplicateProperty(value.name.clone()),
                ));
            }
        }

        Ok(Cow::Owned(map))
    }
}

///
/// RawNamedProperty
/// element of the deprecated values-array shape
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RawNamedProperty {
    pub name: String,

    #[serde(flatten)]
    pub definition: RawPropertyObject,
}

///
/// RawPropertyDefinition
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawPropertyDefinition {
    Shorthand(String),
    Explicit(RawPropertyObject),
}

impl RawPropertyDefinition {
    #[must_use]
    pub fn shorthand(input: impl Into<String>) -> Self {
        Self::Shorthand(input.into())
    }
}

impl From<&str> for RawPropertyDefinition {
    fn from(input: &str) -> Self {
        Self::Shorthand(input.to_string())
    }
}

impl From<String> for RawPropertyDefinition {
    fn from(input: String) -> Self {
        Self::Shorthand(input)
    }
}

impl From<RawPropertyObject> for RawPropertyDefinition {
    fn from(object: RawPropertyObject) -> Self {
        Self::Explicit(object)
    }
}

///
/// RawPropertyObject
///
/// The explicit object form of a property definition. A missing `type` reads
/// as empty and unrecognized keys are kept in `unknown`, so both surface as
/// property errors naming the object and property.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPropertyObject {
    #[serde(rename = "type", default)]
    pub ty: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

impl RawPropertyObject {
    pub const KEYS: [&'static str; 7] = [
        "type",
        "objectType",
        "optional",
        "indexed",
        "mapTo",
        "property",
        "default",
    ];
}

impl RawPropertyObject {
    #[must_use]
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn object_type(mut self, object_type: impl Into<String>) -> Self {
        self.object_type = Some(object_type.into());
        self
    }

    #[must_use]
    pub const fn optional(mut self, optional: bool) -> Self {
        self.optional = Some(optional);
        self
    }

    #[must_use]
    pub const fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = Some(indexed);
        self
    }

    #[must_use]
    pub fn map_to(mut self, map_to: impl Into<String>) -> Self {
        self.map_to = Some(map_to.into());
        self
    }

    #[must_use]
    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: serde_json::Value) -> Self {
        self.default = Some(value);
        self
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

///
/// TESTS
///
