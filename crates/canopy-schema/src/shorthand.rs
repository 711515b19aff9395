//! Parser for the compact shorthand type notation.
//!
//! ```text
//! shorthand := element ( "?" )? ( suffix )?
//! suffix    := "[]" | "{}" | "<>"      // list | dictionary | set
//! ```
//!
//! Markers are stripped right to left. The `?` marker always belongs to the
//! element, so `int?[]` is a list of optional ints and `int[]?` is rejected.

use crate::{error::SyntaxReason, normalize::optionality::is_implicitly_optional, prelude::*};

/// Markers that only have meaning inside a shorthand string.
pub const MARKERS: [&str; 4] = ["[]", "{}", "<>", "?"];

const OPTIONAL_MARKER: char = '?';

///
/// Shorthand
///
/// A shorthand string decomposed and classified. `optional` is what the
/// author wrote; implicit optionality is resolved later.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Shorthand {
    pub ty: PropertyType,
    pub object_type: Option<String>,
    pub optional: bool,
}

/// Decompose a shorthand string.
pub fn parse(input: &str) -> Result<Shorthand, SyntaxReason> {
    if input.is_empty() {
        return Err(SyntaxReason::Empty);
    }

    // collection suffix
    let mut rest = input;
    let collection = CollectionKind::from_suffix(rest);
    if let Some(kind) = collection {
        rest = &rest[..rest.len() - kind.suffix().len()];

        if rest.is_empty() {
            return Err(SyntaxReason::MissingElement(input.to_string()));
        }
        if CollectionKind::from_suffix(rest).is_some() {
            return Err(SyntaxReason::NestedCollection(input.to_string()));
        }
    }

    // optionality marker
    let optional = match rest.strip_suffix(OPTIONAL_MARKER) {
        Some(stripped) => {
            if stripped.is_empty() {
                return Err(SyntaxReason::MissingElement(input.to_string()));
            }
            if let Some(kind) = CollectionKind::from_suffix(stripped) {
                if stripped.len() == kind.suffix().len() {
                    return Err(SyntaxReason::MissingElement(input.to_string()));
                }
                return Err(SyntaxReason::OptionalCollection {
                    input: input.to_string(),
                    suggestion: optional_collection_suggestion(stripped, kind),
                });
            }
            rest = stripped;
            true
        }
        None => false,
    };

    let element = rest;
    if let Some(markers) = find_markers(element) {
        return Err(SyntaxReason::MisplacedMarker {
            input: input.to_string(),
            markers,
        });
    }

    let category = TypeCategory::classify(element)
        .ok_or_else(|| SyntaxReason::MissingElement(input.to_string()))?;

    let (ty, object_type) = match (category, collection) {
        (TypeCategory::Primitive(p), None) => (PropertyType::Primitive(p), None),
        (TypeCategory::Primitive(_) | TypeCategory::UserDefined, Some(kind)) => {
            (PropertyType::Collection(kind), Some(element.to_string()))
        }
        (TypeCategory::UserDefined, None) => (PropertyType::Object, Some(element.to_string())),
        (reserved, _) => {
            return Err(SyntaxReason::ReservedElement {
                input: input.to_string(),
                element: element.to_string(),
                spelling: explicit_spelling(reserved),
            });
        }
    };

    Ok(Shorthand {
        ty,
        object_type,
        optional,
    })
}

/// Render the shorthand for a type, if the notation can express it.
///
/// `optional` is only spelled out when it is not already implied.
#[must_use]
pub fn render(ty: PropertyType, object_type: Option<&str>, optional: bool) -> Option<String> {
    let marker = if optional && !is_implicitly_optional(ty, object_type) {
        "?"
    } else {
        ""
    };

    match (ty, object_type) {
        (PropertyType::Primitive(p), None) => Some(format!("{p}{marker}")),
        (PropertyType::Object, Some(target)) => Some(target.to_string()),
        (PropertyType::Collection(kind), Some(element)) => {
            Some(format!("{element}{marker}{}", kind.suffix()))
        }
        _ => None,
    }
}

// Suggest `elem?[]` for an input written as `elem[]?`.
fn optional_collection_suggestion(stripped: &str, kind: CollectionKind) -> String {
    let element = &stripped[..stripped.len() - kind.suffix().len()];

    format!("{element}{OPTIONAL_MARKER}{}", kind.suffix())
}

// The explicit object-form spelling to use instead of a reserved element word.
fn explicit_spelling(category: TypeCategory) -> String {
    match category {
        TypeCategory::Collection(kind) => {
            format!("{{ type: '{kind}', objectType: '<element type>' }}")
        }
        TypeCategory::LinkingObjects => {
            "{ type: 'linkingObjects', objectType: '<object type>', property: '<property>' }"
                .to_string()
        }
        _ => "{ type: 'object', objectType: '<object type>' }".to_string(),
    }
}

/// Shorthand markers contained in `value`, quoted and joined for messages.
pub(crate) fn find_markers(value: &str) -> Option<String> {
    let found = MARKERS
        .iter()
        .filter(|marker| value.contains(*marker))
        .map(|marker| format!("'{marker}'"))
        .collect::<Vec<_>>();

    if found.is_empty() {
        None
    } else {
        Some(found.join(" and "))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(input: &str) -> Shorthand {
        parse(input).unwrap_or_else(|e| panic!("'{input}' should parse: {e}"))
    }

    #[test]
    fn primitive_alone_is_the_type() {
        let s = ok("int");
        assert_eq!(s.ty, PropertyType::Primitive(Primitive::Int));
        assert_eq!(s.object_type, None);
        assert!(!s.optional);

        assert!(ok("decimal128?").optional);
    }

    #[test]
    fn collection_suffix_moves_element_to_object_type() {
        let list = ok("int[]");
        assert_eq!(list.ty, PropertyType::Collection(CollectionKind::List));
        assert_eq!(list.object_type.as_deref(), Some("int"));

        let dict = ok("string{}");
        assert_eq!(dict.ty, PropertyType::Collection(CollectionKind::Dictionary));

        let set = ok("Person<>");
        assert_eq!(set.ty, PropertyType::Collection(CollectionKind::Set));
        assert_eq!(set.object_type.as_deref(), Some("Person"));
    }

    #[test]
    fn optional_marker_binds_to_element() {
        let s = ok("int?[]");
        assert_eq!(s.ty, PropertyType::Collection(CollectionKind::List));
        assert_eq!(s.object_type.as_deref(), Some("int"));
        assert!(s.optional);
    }

    #[test]
    fn user_defined_alone_is_object_link() {
        let s = ok("Person");
        assert_eq!(s.ty, PropertyType::Object);
        assert_eq!(s.object_type.as_deref(), Some("Person"));
    }

    #[test]
    fn rejects_empty_inputs() {
        assert_eq!(parse(""), Err(SyntaxReason::Empty));
        assert_eq!(parse("[]"), Err(SyntaxReason::MissingElement("[]".into())));
        assert_eq!(parse("?"), Err(SyntaxReason::MissingElement("?".into())));
        assert_eq!(parse("?[]"), Err(SyntaxReason::MissingElement("?[]".into())));
        assert_eq!(parse("[]?"), Err(SyntaxReason::MissingElement("[]?".into())));
        assert_eq!(parse("<>?"), Err(SyntaxReason::MissingElement("<>?".into())));
    }

    #[test]
    fn rejects_markers_inside_element() {
        assert_eq!(
            parse("int??"),
            Err(SyntaxReason::MisplacedMarker {
                input: "int??".into(),
                markers: "'?'".into(),
            })
        );
        assert_eq!(
            parse("Dog[]x"),
            Err(SyntaxReason::MisplacedMarker {
                input: "Dog[]x".into(),
                markers: "'[]'".into(),
            })
        );
        assert_eq!(
            parse("Foo?bar[]"),
            Err(SyntaxReason::MisplacedMarker {
                input: "Foo?bar[]".into(),
                markers: "'?'".into(),
            })
        );
        assert!(matches!(parse("Foo?bar"), Err(SyntaxReason::MisplacedMarker { .. })));
        assert!(matches!(parse("int[]??"), Err(SyntaxReason::MisplacedMarker { .. })));
    }

    #[test]
    fn rejects_nested_collections() {
        for input in ["int[][]", "int{}[]", "Person<>{}", "int?<>[]"] {
            let err = parse(input).unwrap_err();
            assert!(
                matches!(
                    err,
                    SyntaxReason::NestedCollection(_) | SyntaxReason::OptionalCollection { .. }
                ),
                "{input}: {err}"
            );
        }
        assert_eq!(
            parse("int[][]"),
            Err(SyntaxReason::NestedCollection("int[][]".into()))
        );
    }

    #[test]
    fn rejects_optional_collection() {
        assert_eq!(
            parse("int[]?"),
            Err(SyntaxReason::OptionalCollection {
                input: "int[]?".into(),
                suggestion: "int?[]".into(),
            })
        );
    }

    #[test]
    fn rejects_reserved_element_words() {
        for input in ["list", "list[]", "object", "object?", "linkingObjects<>", "set{}"] {
            let err = parse(input).unwrap_err();
            assert!(
                matches!(err, SyntaxReason::ReservedElement { .. }),
                "{input}: {err}"
            );
        }

        let msg = parse("object").unwrap_err().to_string();
        assert!(msg.contains("type: 'object'"), "{msg}");

        let msg = parse("dictionary[]").unwrap_err().to_string();
        assert!(msg.contains("type: 'dictionary'"), "{msg}");
    }

    #[test]
    fn render_inverts_parse() {
        for input in ["int", "int?", "int[]", "int?[]", "Person", "Person{}", "mixed<>"] {
            let s = ok(input);
            assert_eq!(
                render(s.ty, s.object_type.as_deref(), s.optional).as_deref(),
                Some(input)
            );
        }
        assert_eq!(render(PropertyType::LinkingObjects, Some("Person"), false), None);
    }

    #[test]
    fn markers_are_collected() {
        assert_eq!(find_markers("int"), None);
        assert_eq!(find_markers("int?[]").as_deref(), Some("'[]' and '?'"));
    }
}
