use crate::{prelude::*, shorthand};

///
/// CanonicalPropertySchema
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPropertySchema {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: PropertyType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,

    pub optional: bool,
    pub indexed: bool,
    pub map_to: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl CanonicalPropertySchema {
    /// Shorthand spelling of this property's type, when one exists.
    ///
    /// Only the type is covered: `mapTo`, `default` and `indexed` have no
    /// shorthand notation, and `linkingObjects` can't be written at all.
    #[must_use]
    pub fn to_shorthand(&self) -> Option<String> {
        shorthand::render(self.ty, self.object_type.as_deref(), self.optional)
    }

    /// Explicit object form that normalizes back to this exact record.
    #[must_use]
    pub fn to_raw(&self) -> RawPropertyObject {
        RawPropertyObject {
            ty: self.ty.to_string(),
            object_type: self.object_type.clone(),
            optional: Some(self.optional),
            indexed: Some(self.indexed),
            map_to: Some(self.map_to.clone()),
            property: self.property.clone(),
            default: self.default.clone(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn is_relationship(&self) -> bool {
        matches!(self.ty, PropertyType::Object | PropertyType::LinkingObjects)
            || self
                .object_type
                .as_deref()
                .is_some_and(crate::types::is_user_defined)
    }
}

///
/// TESTS
///
