use crate::prelude::*;
use derive_more::{Display, FromStr};

///
/// Primitive
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, PartialEq)]
#[display(rename_all = "camelCase")]
#[from_str(rename_all = "camelCase")]
#[remain::sorted]
pub enum Primitive {
    Bool,
    Data,
    Date,
    Decimal128,
    Double,
    Float,
    Int,
    Mixed,
    ObjectId,
    String,
    Uuid,
}

impl Primitive {
    pub const ALL: [Self; 11] = [
        Self::Bool,
        Self::Data,
        Self::Date,
        Self::Decimal128,
        Self::Double,
        Self::Float,
        Self::Int,
        Self::Mixed,
        Self::ObjectId,
        Self::String,
        Self::Uuid,
    ];

    #[must_use]
    pub const fn is_mixed(self) -> bool {
        matches!(self, Self::Mixed)
    }
}

///
/// CollectionKind
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, PartialEq)]
#[display(rename_all = "camelCase")]
#[from_str(rename_all = "camelCase")]
#[remain::sorted]
pub enum CollectionKind {
    Dictionary,
    List,
    Set,
}

impl CollectionKind {
    pub const ALL: [Self; 3] = [Self::Dictionary, Self::List, Self::Set];

    /// The two-character shorthand marker that spells this collection.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Dictionary => "{}",
            Self::List => "[]",
            Self::Set => "<>",
        }
    }

    #[must_use]
    pub fn from_suffix(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| input.ends_with(kind.suffix()))
    }
}

///
/// UnknownKeyword
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("'{0}' is not a known type keyword")]
pub struct UnknownKeyword(pub String);

///
/// PropertyType
///
/// The resolved type keyword of a canonical property. User-defined names never
/// appear here; they are carried as the `objectType` of an `object`,
/// `linkingObjects` or collection property.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum PropertyType {
    #[display("{_0}")]
    Primitive(Primitive),
    #[display("{_0}")]
    Collection(CollectionKind),
    #[display("object")]
    Object,
    #[display("linkingObjects")]
    LinkingObjects,
}

impl PropertyType {
    #[must_use]
    pub const fn is_mixed(self) -> bool {
        matches!(self, Self::Primitive(Primitive::Mixed))
    }

    #[must_use]
    pub const fn collection(self) -> Option<CollectionKind> {
        match self {
            Self::Collection(kind) => Some(kind),
            _ => None,
        }
    }
}

impl Serialize for PropertyType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl std::str::FromStr for PropertyType {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match TypeCategory::classify(s) {
            Some(TypeCategory::Primitive(p)) => Ok(Self::Primitive(p)),
            Some(TypeCategory::Collection(kind)) => Ok(Self::Collection(kind)),
            Some(TypeCategory::Object) => Ok(Self::Object),
            Some(TypeCategory::LinkingObjects) => Ok(Self::LinkingObjects),
            Some(TypeCategory::UserDefined) | None => Err(UnknownKeyword(s.to_string())),
        }
    }
}

///
/// TypeCategory
///
/// Closed partition of type names. Both the shorthand and the explicit
/// object-form paths branch on this classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeCategory {
    Primitive(Primitive),
    Collection(CollectionKind),
    Object,
    LinkingObjects,
    UserDefined,
}

impl TypeCategory {
    pub const OBJECT: &'static str = "object";
    pub const LINKING_OBJECTS: &'static str = "linkingObjects";

    /// Classify a type name; `None` only for the empty string.
    #[must_use]
    pub fn classify(name: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }

        let category = if let Ok(p) = name.parse::<Primitive>() {
            Self::Primitive(p)
        } else if let Ok(kind) = name.parse::<CollectionKind>() {
            Self::Collection(kind)
        } else if name == Self::OBJECT {
            Self::Object
        } else if name == Self::LINKING_OBJECTS {
            Self::LinkingObjects
        } else {
            Self::UserDefined
        };

        Some(category)
    }

    /// Keywords that may never stand in for a user-defined element type.
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        matches!(
            self,
            Self::Collection(_) | Self::Object | Self::LinkingObjects
        )
    }
}

//
// predicates
//

#[must_use]
pub fn is_primitive(name: &str) -> bool {
    matches!(TypeCategory::classify(name), Some(TypeCategory::Primitive(_)))
}

#[must_use]
pub fn is_collection(name: &str) -> bool {
    matches!(
        TypeCategory::classify(name),
        Some(TypeCategory::Collection(_))
    )
}

#[must_use]
pub fn is_user_defined(name: &str) -> bool {
    matches!(TypeCategory::classify(name), Some(TypeCategory::UserDefined))
}

///
/// TESTS
///
