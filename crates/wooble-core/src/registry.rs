//! Component registry for storing and looking up creations.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::errors::RegistryError;
use crate::params::{Params, Value};

/// A registered creation: how to build it and the parameters it accepts.
#[derive(Debug)]
pub struct ComponentEntry<F, V = Value> {
    /// Builds one instance per matching node.
    pub factory: F,
    /// Default parameters. Also the whitelist of parameter names a caller may
    /// override.
    pub defaults: Params<V>,
}

/// An immutable registry of creations keyed by id.
///
/// Created through [`RegistryBuilder`]; nothing can be added or changed once
/// built, so every handle sees the same factory and defaults for an id.
pub struct ComponentRegistry<F, V = Value> {
    components: IndexMap<String, Rc<ComponentEntry<F, V>>>,
}

impl<F, V> ComponentRegistry<F, V> {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder<F, V> {
        RegistryBuilder::new()
    }

    /// Get a creation by id.
    pub fn get(&self, id: &str) -> Option<&ComponentEntry<F, V>> {
        self.components.get(id).map(Rc::as_ref)
    }

    /// Get a shared reference to a creation, for handles that outlive the borrow.
    pub fn entry(&self, id: &str) -> Option<Rc<ComponentEntry<F, V>>> {
        self.components.get(id).cloned()
    }

    /// Check if a creation exists.
    pub fn contains(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    /// All creation ids, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Number of registered creations.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<F, V> Default for ComponentRegistry<F, V> {
    fn default() -> Self {
        Self {
            components: IndexMap::new(),
        }
    }
}

impl<F, V> fmt::Debug for ComponentRegistry<F, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("ids", &self.components.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for a [`ComponentRegistry`].
pub struct RegistryBuilder<F, V = Value> {
    components: IndexMap<String, Rc<ComponentEntry<F, V>>>,
}

impl<F, V> RegistryBuilder<F, V> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            components: IndexMap::new(),
        }
    }

    /// Register a creation under a unique id.
    ///
    /// Fails if the id is taken; the existing entry is left in place.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        factory: F,
        defaults: Params<V>,
    ) -> Result<&mut Self, RegistryError> {
        let id = id.into();
        if self.components.contains_key(&id) {
            return Err(RegistryError::DuplicateComponent { id });
        }
        tracing::debug!(id = %id, params = defaults.len(), "registered creation");
        self.components
            .insert(id, Rc::new(ComponentEntry { factory, defaults }));
        Ok(self)
    }

    /// Register a creation, builder style.
    pub fn with(
        mut self,
        id: impl Into<String>,
        factory: F,
        defaults: Params<V>,
    ) -> Result<Self, RegistryError> {
        self.register(id, factory, defaults)?;
        Ok(self)
    }

    /// Freeze the registry.
    pub fn build(self) -> ComponentRegistry<F, V> {
        ComponentRegistry {
            components: self.components,
        }
    }
}

impl<F, V> Default for RegistryBuilder<F, V> {
    fn default() -> Self {
        Self::new()
    }
}
