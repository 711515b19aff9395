use crate::prelude::*;
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error as ThisError;

///
/// RegistryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RegistryError {
    #[error("object schema '{0}' is registered more than once")]
    DuplicateObject(String),
}

///
/// SchemaRegistry
///
/// Canonical schemas keyed by object name, together with the class each one
/// was declared by. Built once from a normalized schema and owned by the
/// caller; the normalizer itself never holds one.
///

#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    entries: BTreeMap<String, RegistryEntry>,
    order: Vec<String>,
}

///
/// RegistryEntry
///

#[derive(Clone, Debug)]
pub struct RegistryEntry {
    pub schema: CanonicalObjectSchema,
}

impl RegistryEntry {
    /// The declaring class, if it was class-style and is still alive.
    #[must_use]
    pub fn constructor(&self) -> Option<Arc<dyn SchemaClass>> {
        self.schema
            .constructor
            .as_ref()
            .and_then(ConstructorRef::upgrade)
    }
}

impl SchemaRegistry {
    /// Build a registry from normalized schemas, rejecting duplicate names.
    pub fn new(schema: Vec<CanonicalObjectSchema>) -> Result<Self, RegistryError> {
        let mut entries = BTreeMap::new();
        let mut order = Vec::with_capacity(schema.len());

        for object in schema {
            let name = object.name.clone();
            if entries.contains_key(&name) {
                return Err(RegistryError::DuplicateObject(name));
            }

            order.push(name.clone());
            entries.insert(name, RegistryEntry { schema: object });
        }

        tracing::debug!(objects = order.len(), "built schema registry");

        Ok(Self { entries, order })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn schema(&self, name: &str) -> Option<&CanonicalObjectSchema> {
        self.get(name).map(|entry| &entry.schema)
    }

    #[must_use]
    pub fn constructor(&self, name: &str) -> Option<Arc<dyn SchemaClass>> {
        self.get(name).and_then(RegistryEntry::constructor)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Schemas in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CanonicalObjectSchema> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name))
            .map(|entry| &entry.schema)
    }

    /// Relationship targets that name no registered object, as
    /// `(object, property, missing target)`.
    #[must_use]
    pub fn dangling_links(&self) -> Vec<(String, String, String)> {
        let mut dangling = Vec::new();

        for object in self.iter() {
            for prop in object.properties.values().filter(|p| p.is_relationship()) {
                let Some(target) = prop.object_type.as_deref() else {
                    continue;
                };
                if !self.contains(target) {
                    dangling.push((object.name.clone(), prop.name.clone(), target.to_string()));
                }
            }
        }

        dangling
    }
}

///
/// TESTS
///
