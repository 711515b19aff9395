use crate::{error::SemanticReason, prelude::*, types::is_user_defined};

// Mixed values hold null, to-one links are nullable, and dictionary values
// pointing at objects may be null.
#[must_use]
pub fn is_implicitly_optional(ty: PropertyType, object_type: Option<&str>) -> bool {
    ty.is_mixed()
        || object_type.is_some_and(|t| t.parse::<Primitive>().is_ok_and(Primitive::is_mixed))
        || ty == PropertyType::Object
        || (ty == PropertyType::Collection(CollectionKind::Dictionary)
            && object_type.is_some_and(is_user_defined))
}

// List/set members and inverse links always reference live objects.
#[must_use]
pub fn is_implicitly_non_optional(ty: PropertyType, object_type: Option<&str>) -> bool {
    matches!(
        ty,
        PropertyType::Collection(CollectionKind::List | CollectionKind::Set)
            | PropertyType::LinkingObjects
    ) && object_type.is_some_and(is_user_defined)
}

/// Resolve the canonical `optional` flag against the implicit rules.
///
/// `requested` is `None` when the author said nothing.
pub fn resolve(
    ty: PropertyType,
    object_type: Option<&str>,
    requested: Option<bool>,
) -> Result<bool, SemanticReason> {
    if is_implicitly_optional(ty, object_type) {
        if requested == Some(false) {
            return Err(SemanticReason::ImplicitlyOptional(describe(ty, object_type)));
        }
        return Ok(true);
    }

    if is_implicitly_non_optional(ty, object_type) {
        if requested == Some(true) {
            return Err(SemanticReason::ImplicitlyNonOptional(describe(ty, object_type)));
        }
        return Ok(false);
    }

    Ok(requested.unwrap_or(false))
}

// 'list<Person>' style rendering for messages
fn describe(ty: PropertyType, object_type: Option<&str>) -> String {
    match object_type {
        Some(object_type) => format!("'{ty}<{object_type}>'"),
        None => format!("'{ty}'"),
    }
}

///
/// TESTS
///
