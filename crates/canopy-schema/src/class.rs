use crate::prelude::*;
use std::{
    fmt,
    sync::{Arc, Weak},
};

///
/// SchemaClass
///
/// A class-style handle carrying a static schema. The normalizer only reads
/// `schema()`; it never constructs instances.
///

pub trait SchemaClass: Send + Sync {
    fn schema(&self) -> &RawObjectDefinition;
}

///
/// ObjectDefinition
///

#[derive(Clone)]
pub enum ObjectDefinition {
    Plain(RawObjectDefinition),
    Class(Arc<dyn SchemaClass>),
}

impl ObjectDefinition {
    #[must_use]
    pub fn raw(&self) -> &RawObjectDefinition {
        match self {
            Self::Plain(raw) => raw,
            Self::Class(class) => class.schema(),
        }
    }

    #[must_use]
    pub fn constructor(&self) -> Option<ConstructorRef> {
        match self {
            Self::Plain(_) => None,
            Self::Class(class) => Some(ConstructorRef::new(class)),
        }
    }
}

impl fmt::Debug for ObjectDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(raw) => f.debug_tuple("Plain").field(raw).finish(),
            Self::Class(class) => f.debug_tuple("Class").field(&class.schema().name).finish(),
        }
    }
}

impl From<RawObjectDefinition> for ObjectDefinition {
    fn from(raw: RawObjectDefinition) -> Self {
        Self::Plain(raw)
    }
}

impl From<Arc<dyn SchemaClass>> for ObjectDefinition {
    fn from(class: Arc<dyn SchemaClass>) -> Self {
        Self::Class(class)
    }
}

///
/// ConstructorRef
///
/// Non-owning link from a canonical schema back to the class it came from.
/// The class may be dropped at any time; `upgrade` then returns `None`.
///

#[derive(Clone)]
pub struct ConstructorRef(Weak<dyn SchemaClass>);

impl ConstructorRef {
    #[must_use]
    pub fn new(class: &Arc<dyn SchemaClass>) -> Self {
        Self(Arc::downgrade(class))
    }

    #[must_use]
    pub fn upgrade(&self) -> Option<Arc<dyn SchemaClass>> {
        self.0.upgrade()
    }

    #[must_use]
    pub fn points_to(&self, class: &Arc<dyn SchemaClass>) -> bool {
        std::ptr::addr_eq(self.0.as_ptr(), Arc::as_ptr(class))
    }
}

impl fmt::Debug for ConstructorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(class) => write!(f, "ConstructorRef({})", class.schema().name),
            None => f.write_str("ConstructorRef(<dropped>)"),
        }
    }
}

impl PartialEq for ConstructorRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.0.as_ptr(), other.0.as_ptr())
    }
}

///
/// TESTS
///
