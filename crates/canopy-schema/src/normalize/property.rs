use crate::{
    Error,
    error::{
        PropertySemanticError, PropertySyntaxError, SemanticReason, SyntaxReason,
        describe_object_type,
    },
    normalize::optionality,
    prelude::*,
    shorthand,
    types::{is_primitive, is_user_defined},
};

///
/// PropertyContext
/// where a property lives, used to qualify errors
///

#[derive(Clone, Copy, Debug)]
struct PropertyContext<'a> {
    object: &'a str,
    property: &'a str,
    is_primary_key: bool,
}

impl PropertyContext<'_> {
    fn syntax(&self, reason: SyntaxReason) -> Error {
        PropertySyntaxError {
            object: self.object.to_string(),
            property: self.property.to_string(),
            reason,
        }
        .into()
    }

    fn semantic(&self, reason: SemanticReason) -> Error {
        PropertySemanticError {
            object: self.object.to_string(),
            property: self.property.to_string(),
            reason,
        }
        .into()
    }
}

/// Normalize one property of `object` into its canonical record.
pub fn normalize_property(
    object: &str,
    name: &str,
    definition: &RawPropertyDefinition,
    is_primary_key: bool,
) -> Result<CanonicalPropertySchema, Error> {
    let cx = PropertyContext {
        object,
        property: name,
        is_primary_key,
    };

    let prop = match definition {
        RawPropertyDefinition::Shorthand(input) => normalize_shorthand(cx, input)?,
        RawPropertyDefinition::Explicit(raw) => normalize_explicit(cx, raw)?,
    };

    tracing::trace!(
        object,
        property = name,
        ty = %prop.ty,
        optional = prop.optional,
        indexed = prop.indexed,
        "normalized property"
    );

    Ok(prop)
}

fn normalize_shorthand(
    cx: PropertyContext<'_>,
    input: &str,
) -> Result<CanonicalPropertySchema, Error> {
    let parsed = shorthand::parse(input).map_err(|reason| cx.syntax(reason))?;

    // no marker means "unspecified", never an explicit false
    let requested = parsed.optional.then_some(true);
    let optional = optionality::resolve(parsed.ty, parsed.object_type.as_deref(), requested)
        .map_err(|reason| cx.semantic(reason))?;

    Ok(CanonicalPropertySchema {
        name: cx.property.to_string(),
        ty: parsed.ty,
        object_type: parsed.object_type,
        property: None,
        optional,
        indexed: cx.is_primary_key,
        map_to: cx.property.to_string(),
        default: None,
    })
}

fn normalize_explicit(
    cx: PropertyContext<'_>,
    raw: &RawPropertyObject,
) -> Result<CanonicalPropertySchema, Error> {
    // shape
    if let Some(key) = raw.unknown.keys().next() {
        let expected = RawPropertyObject::KEYS.map(|k| format!("'{k}'")).join(", ");

        return Err(cx.syntax(SyntaxReason::UnknownKey {
            key: key.clone(),
            expected,
        }));
    }
    if raw.ty.is_empty() {
        return Err(cx.syntax(SyntaxReason::Empty));
    }
    reject_shorthand(cx, "type", &raw.ty)?;
    if let Some(object_type) = &raw.object_type {
        reject_shorthand(cx, "objectType", object_type)?;
    }

    let object_type = raw.object_type.as_deref();
    let ty = resolve_type(cx, raw, object_type)?;

    if raw.property.is_some() && ty != PropertyType::LinkingObjects {
        return Err(cx.semantic(SemanticReason::UnexpectedLinkingProperty {
            ty: raw.ty.clone(),
        }));
    }

    let optional = optionality::resolve(ty, object_type, raw.optional)
        .map_err(|reason| cx.semantic(reason))?;

    let indexed = if cx.is_primary_key {
        if raw.indexed == Some(false) {
            return Err(cx.semantic(SemanticReason::PrimaryKeyNotIndexed));
        }
        true
    } else {
        raw.indexed.unwrap_or(false)
    };

    Ok(CanonicalPropertySchema {
        name: cx.property.to_string(),
        ty,
        object_type: raw.object_type.clone(),
        property: raw.property.clone(),
        optional,
        indexed,
        map_to: raw
            .map_to
            .clone()
            .unwrap_or_else(|| cx.property.to_string()),
        default: raw.default.clone(),
    })
}

// Category rules: what `objectType` each kind of `type` accepts.
fn resolve_type(
    cx: PropertyContext<'_>,
    raw: &RawPropertyObject,
    object_type: Option<&str>,
) -> Result<PropertyType, Error> {
    let Some(category) = TypeCategory::classify(&raw.ty) else {
        return Err(cx.syntax(SyntaxReason::Empty));
    };

    match category {
        TypeCategory::Primitive(p) => {
            if let Some(object_type) = object_type {
                return Err(cx.semantic(SemanticReason::UnexpectedObjectType {
                    ty: raw.ty.clone(),
                    object_type: object_type.to_string(),
                }));
            }

            Ok(PropertyType::Primitive(p))
        }

        TypeCategory::Collection(kind) => {
            if !object_type.is_some_and(|t| is_primitive(t) || is_user_defined(t)) {
                return Err(cx.semantic(SemanticReason::InvalidElementType {
                    ty: raw.ty.clone(),
                    found: describe_object_type(object_type),
                }));
            }

            Ok(PropertyType::Collection(kind))
        }

        TypeCategory::Object => {
            require_relationship_target(cx, raw, object_type)?;

            Ok(PropertyType::Object)
        }

        TypeCategory::LinkingObjects => {
            let target = require_relationship_target(cx, raw, object_type)?;
            if raw.property.as_deref().is_none_or(str::is_empty) {
                return Err(cx.semantic(SemanticReason::MissingLinkingProperty {
                    object_type: target.to_string(),
                }));
            }

            Ok(PropertyType::LinkingObjects)
        }

        TypeCategory::UserDefined => {
            Err(cx.semantic(SemanticReason::UserDefinedType(raw.ty.clone())))
        }
    }
}

fn require_relationship_target<'a>(
    cx: PropertyContext<'_>,
    raw: &RawPropertyObject,
    object_type: Option<&'a str>,
) -> Result<&'a str, Error> {
    match object_type {
        Some(target) if is_user_defined(target) => Ok(target),
        _ => Err(cx.semantic(SemanticReason::InvalidRelationshipTarget {
            ty: raw.ty.clone(),
            found: describe_object_type(object_type),
        })),
    }
}

fn reject_shorthand(
    cx: PropertyContext<'_>,
    field: &'static str,
    value: &str,
) -> Result<(), Error> {
    match shorthand::find_markers(value) {
        Some(markers) => Err(cx.syntax(SyntaxReason::ShorthandInObjectForm {
            field,
            value: value.to_string(),
            markers,
        })),
        None => Ok(()),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn short(input: &str) -> Result<CanonicalPropertySchema, Error> {
        normalize_property("Person", "field", &RawPropertyDefinition::shorthand(input), false)
    }

    fn explicit(raw: RawPropertyObject) -> Result<CanonicalPropertySchema, Error> {
        normalize_property("Person", "field", &raw.into(), false)
    }

    fn semantic_reason(result: Result<CanonicalPropertySchema, Error>) -> SemanticReason {
        match result {
            Err(Error::PropertySemantic(err)) => err.reason,
            other => panic!("expected a semantic error, got {other:?}"),
        }
    }

    fn syntax_reason(result: Result<CanonicalPropertySchema, Error>) -> SyntaxReason {
        match result {
            Err(Error::PropertySyntax(err)) => err.reason,
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn shorthand_int() {
        let prop = short("int").unwrap();

        assert_eq!(prop.ty, PropertyType::Primitive(Primitive::Int));
        assert!(!prop.optional);
        assert!(!prop.indexed);
        assert_eq!(prop.map_to, "field");
        assert_eq!(prop.object_type, None);
    }

    #[test]
    fn shorthand_optional_list_element() {
        let prop = short("int?[]").unwrap();

        assert_eq!(prop.ty, PropertyType::Collection(CollectionKind::List));
        assert_eq!(prop.object_type.as_deref(), Some("int"));
        assert!(prop.optional);
    }

    #[test]
    fn shorthand_user_defined_is_optional_link() {
        let prop = short("Dog").unwrap();

        assert_eq!(prop.ty, PropertyType::Object);
        assert_eq!(prop.object_type.as_deref(), Some("Dog"));
        assert!(prop.optional);
    }

    #[test]
    fn shorthand_optional_link_list_is_rejected() {
        assert_eq!(
            semantic_reason(short("Dog?[]")),
            SemanticReason::ImplicitlyNonOptional("'list<Dog>'".into())
        );
        assert!(short("Dog?").unwrap().optional);
        assert!(short("Dog?{}").unwrap().optional);
    }

    #[test]
    fn shorthand_primary_key_is_indexed() {
        let prop =
            normalize_property("Person", "id", &RawPropertyDefinition::shorthand("int"), true)
                .unwrap();

        assert!(prop.indexed);
    }

    #[test]
    fn explicit_rejects_shorthand_markers() {
        assert_eq!(
            syntax_reason(explicit(RawPropertyObject::new("int[]"))),
            SyntaxReason::ShorthandInObjectForm {
                field: "type",
                value: "int[]".into(),
                markers: "'[]'".into(),
            }
        );
        assert_eq!(
            syntax_reason(explicit(RawPropertyObject::new("list").object_type("int?"))),
            SyntaxReason::ShorthandInObjectForm {
                field: "objectType",
                value: "int?".into(),
                markers: "'?'".into(),
            }
        );
        assert_eq!(syntax_reason(explicit(RawPropertyObject::new(""))), SyntaxReason::Empty);
    }

    #[test]
    fn explicit_rejects_unknown_keys() {
        let mut raw = RawPropertyObject::new("int");
        raw.unknown.insert("optinal".to_string(), json!(true));

        let SyntaxReason::UnknownKey { key, expected } = syntax_reason(explicit(raw)) else {
            panic!("expected an unknown key");
        };
        assert_eq!(key, "optinal");
        assert!(expected.contains("'optional'"), "{expected}");
    }

    #[test]
    fn shorthand_markers_inside_element_match_explicit_form() {
        for input in ["int??", "Dog[]x", "Foo?bar"] {
            assert!(
                matches!(syntax_reason(short(input)), SyntaxReason::MisplacedMarker { .. }),
                "{input}"
            );
        }
        assert!(matches!(
            syntax_reason(explicit(RawPropertyObject::new("object").object_type("int?"))),
            SyntaxReason::ShorthandInObjectForm { .. }
        ));
    }

    #[test]
    fn explicit_primitive_rejects_object_type() {
        assert!(matches!(
            semantic_reason(explicit(RawPropertyObject::new("string").object_type("Dog"))),
            SemanticReason::UnexpectedObjectType { .. }
        ));
    }

    #[test]
    fn explicit_collection_element_rules() {
        assert!(explicit(RawPropertyObject::new("set").object_type("uuid")).is_ok());
        assert!(explicit(RawPropertyObject::new("set").object_type("Dog")).is_ok());

        for bad in ["list", "object", "linkingObjects", ""] {
            assert!(
                matches!(
                    semantic_reason(explicit(RawPropertyObject::new("set").object_type(bad))),
                    SemanticReason::InvalidElementType { .. }
                ),
                "{bad}"
            );
        }
        assert_eq!(
            semantic_reason(explicit(RawPropertyObject::new("list"))),
            SemanticReason::InvalidElementType {
                ty: "list".into(),
                found: "nothing".into(),
            }
        );
    }

    #[test]
    fn explicit_object_needs_user_defined_target() {
        let prop = explicit(RawPropertyObject::new("object").object_type("Dog")).unwrap();
        assert!(prop.optional);

        assert!(matches!(
            semantic_reason(explicit(RawPropertyObject::new("object").object_type("int"))),
            SemanticReason::InvalidRelationshipTarget { .. }
        ));
        assert!(matches!(
            semantic_reason(explicit(RawPropertyObject::new("object"))),
            SemanticReason::InvalidRelationshipTarget { .. }
        ));
    }

    #[test]
    fn explicit_linking_objects() {
        let prop = explicit(
            RawPropertyObject::new("linkingObjects")
                .object_type("Dog")
                .property("owner"),
        )
        .unwrap();
        assert_eq!(prop.ty, PropertyType::LinkingObjects);
        assert_eq!(prop.property.as_deref(), Some("owner"));
        assert!(!prop.optional);

        assert_eq!(
            semantic_reason(explicit(RawPropertyObject::new("linkingObjects").object_type("Dog"))),
            SemanticReason::MissingLinkingProperty {
                object_type: "Dog".into()
            }
        );
    }

    #[test]
    fn explicit_property_only_for_linking_objects() {
        assert_eq!(
            semantic_reason(explicit(
                RawPropertyObject::new("list").object_type("Dog").property("owner")
            )),
            SemanticReason::UnexpectedLinkingProperty { ty: "list".into() }
        );
    }

    #[test]
    fn explicit_user_defined_type_is_rejected() {
        let result = explicit(RawPropertyObject::new("Dog"));
        let msg = result.as_ref().unwrap_err().to_string();

        assert_eq!(
            semantic_reason(result),
            SemanticReason::UserDefinedType("Dog".into())
        );
        assert!(msg.contains("type: 'object', objectType: 'Dog'"), "{msg}");
    }

    #[test]
    fn explicit_optionality_contradictions() {
        assert!(matches!(
            semantic_reason(explicit(RawPropertyObject::new("mixed").optional(false))),
            SemanticReason::ImplicitlyOptional(_)
        ));
        assert!(matches!(
            semantic_reason(explicit(
                RawPropertyObject::new("list").object_type("Dog").optional(true)
            )),
            SemanticReason::ImplicitlyNonOptional(_)
        ));
        assert!(
            explicit(RawPropertyObject::new("list").object_type("Dog").optional(false)).is_ok()
        );
    }

    #[test]
    fn explicit_primary_key_indexing() {
        let pk = |raw: RawPropertyObject| normalize_property("Person", "id", &raw.into(), true);

        assert!(pk(RawPropertyObject::new("string")).unwrap().indexed);
        assert!(pk(RawPropertyObject::new("string").indexed(true)).unwrap().indexed);
        assert_eq!(
            semantic_reason(pk(RawPropertyObject::new("string").indexed(false))),
            SemanticReason::PrimaryKeyNotIndexed
        );
    }

    #[test]
    fn explicit_carries_map_to_and_default() {
        let prop = explicit(
            RawPropertyObject::new("int")
                .map_to("_age")
                .default_value(json!(3))
                .indexed(true),
        )
        .unwrap();

        assert_eq!(prop.map_to, "_age");
        assert_eq!(prop.default, Some(json!(3)));
        assert!(prop.indexed);
    }

    #[test]
    fn errors_name_object_and_property() {
        let err = normalize_property(
            "Person",
            "pets",
            &RawPropertyDefinition::shorthand("Dog[]?"),
            false,
        )
        .unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("'pets'"), "{msg}");
        assert!(msg.contains("'Person'"), "{msg}");
        assert!(msg.contains("'Dog?[]'"), "{msg}");
    }
}
