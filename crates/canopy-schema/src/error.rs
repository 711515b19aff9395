use crate::prelude::*;

///
/// ObjectSchemaError
///
/// Whole-object defect: name, primary key, flag conflicts or properties shape.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("invalid schema for object '{object}': {reason}")]
pub struct ObjectSchemaError {
    pub object: String,
    pub reason: ObjectSchemaReason,
}

impl ObjectSchemaError {
    pub fn new(object: impl Into<String>, reason: ObjectSchemaReason) -> Self {
        Self {
            object: object.into(),
            reason,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ObjectSchemaReason {
    #[error("expected a non-empty 'name' on the object schema")]
    EmptyName,

    #[error(
        "primary key '{0}' is not declared under 'properties'; add the property or remove 'primaryKey'"
    )]
    MissingPrimaryKey(String),

    #[error("an object cannot be both asymmetric and embedded; set at most one of the two flags")]
    AsymmetricAndEmbedded,

    #[error(
        "'properties' is an array; declare properties as a mapping from name to definition, or enable 'allow_values_arrays'"
    )]
    ValuesArrayDisabled,

    #[error("property '{0}' appears more than once in the 'properties' array")]
    DuplicateProperty(String),
}

///
/// PropertySyntaxError
///
/// Malformed shorthand, or shorthand markers used where the explicit object
/// form is required.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("invalid type declaration for property '{property}' on object '{object}': {reason}")]
pub struct PropertySyntaxError {
    pub object: String,
    pub property: String,
    pub reason: SyntaxReason,
}

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SyntaxReason {
    #[error("the type is missing or empty")]
    Empty,

    #[error(
        "'{input}' has {markers} inside its element type; markers may only follow the element, as in 'int?' or 'int?[]'"
    )]
    MisplacedMarker { input: String, markers: String },

    #[error("'{0}' has no element type in front of its markers")]
    MissingElement(String),

    #[error("'{0}' nests collections; only a single level of '[]', '{{}}' or '<>' is supported")]
    NestedCollection(String),

    #[error(
        "'{input}' marks the collection as optional; collections cannot be optional, put '?' after the element type instead (e.g. '{suggestion}')"
    )]
    OptionalCollection { input: String, suggestion: String },

    #[error("'{input}' uses '{element}' as an element type; declare it as {spelling} instead")]
    ReservedElement {
        input: String,
        element: String,
        spelling: String,
    },

    #[error(
        "'{field}' is '{value}', which uses shorthand {markers}; shorthand is not allowed in a property object, use 'type', 'objectType' and 'optional' instead"
    )]
    ShorthandInObjectForm {
        field: &'static str,
        value: String,
        markers: String,
    },

    #[error("'{key}' is not a property attribute; expected one of {expected}")]
    UnknownKey { key: String, expected: String },
}

///
/// PropertySemanticError
///
/// Category rule violated by an explicit object-form definition, or an
/// optionality/indexing value contradicting an implicit rule.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("invalid definition for property '{property}' on object '{object}': {reason}")]
pub struct PropertySemanticError {
    pub object: String,
    pub property: String,
    pub reason: SemanticReason,
}

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SemanticReason {
    #[error("primitive type '{ty}' cannot have an 'objectType' (got '{object_type}'); remove it")]
    UnexpectedObjectType { ty: String, object_type: String },

    #[error(
        "collection type '{ty}' needs an 'objectType' that is a primitive or a user-defined object type, got {found}"
    )]
    InvalidElementType { ty: String, found: String },

    #[error("type '{ty}' needs an 'objectType' naming a user-defined object type, got {found}")]
    InvalidRelationshipTarget { ty: String, found: String },

    #[error(
        "type 'linkingObjects' needs 'property' naming the property on '{object_type}' that links back to this object"
    )]
    MissingLinkingProperty { object_type: String },

    #[error("'property' is only allowed with type 'linkingObjects', got type '{ty}'")]
    UnexpectedLinkingProperty { ty: String },

    #[error(
        "'{0}' is a user-defined type and cannot be used as 'type'; use {{ type: 'object', objectType: '{0}' }} or {{ type: 'linkingObjects', objectType: '{0}', property: '...' }}"
    )]
    UserDefinedType(String),

    #[error("properties of type {0} are always optional; remove 'optional: false'")]
    ImplicitlyOptional(String),

    #[error("properties of type {0} can never be optional; remove 'optional: true' or the '?' marker")]
    ImplicitlyNonOptional(String),

    #[error("primary keys are always indexed; remove 'indexed: false'")]
    PrimaryKeyNotIndexed,
}

/// Render a possibly-absent `objectType` for error messages.
pub(crate) fn describe_object_type(object_type: Option<&str>) -> String {
    match object_type {
        Some("") => "an empty string".to_string(),
        Some(name) => format!("'{name}'"),
        None => "nothing".to_string(),
    }
}

///
/// TESTS
///
