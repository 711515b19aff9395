//! ## Crate layout
//! - `types`: the closed type-name taxonomy and its classifier.
//! - `shorthand`: parser for compact type strings such as `int?[]`.
//! - `raw`: the definitions authored by consumers, as they arrive.
//! - `node`: canonical, fully-resolved object and property schemas.
//! - `normalize`: the pipeline turning `raw` into `node`.
//! - `class`: class-style definitions and the non-owning constructor link.
//!
//! Normalization is pure: every call depends only on its arguments and the
//! explicit [`NormalizeOptions`].

pub mod class;
pub mod error;
pub mod node;
pub mod normalize;
pub mod raw;
pub mod shorthand;
pub mod types;

pub use normalize::{NormalizeOptions, normalize_object, normalize_property, normalize_schema};

use crate::error::{ObjectSchemaError, PropertySemanticError, PropertySyntaxError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        class::{ConstructorRef, ObjectDefinition, SchemaClass},
        node::{CanonicalObjectSchema, CanonicalPropertySchema},
        raw::{RawObjectDefinition, RawProperties, RawPropertyDefinition, RawPropertyObject},
        types::{CollectionKind, Primitive, PropertyType, TypeCategory},
    };
    pub use serde::{Deserialize, Serialize};
    pub(crate) use thiserror::Error as ThisError;
}

///
/// Error
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    ObjectSchema(#[from] ObjectSchemaError),

    #[error(transparent)]
    PropertySyntax(#[from] PropertySyntaxError),

    #[error(transparent)]
    PropertySemantic(#[from] PropertySemanticError),
}
