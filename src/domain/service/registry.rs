//! Component registry.
//!
//! The registry is the single table mapping a component name to its
//! [`Component`]. Iteration follows registration order, which is the order in
//! which names were first referenced.

use indexmap::IndexMap;
use indexmap::map::Entry;
use log::debug;

use crate::domain::model::{Component, ComponentId};

/// Insertion-ordered table of every component the graph has seen.
///
/// There is no deletion: removing a component from the graph only flips its
/// install state, so ids handed out by the registry stay valid.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    components: IndexMap<String, Component>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructed component.
    ///
    /// If a component with the same name is already registered, the existing
    /// entry (with its state and edges) is kept and its id is returned.
    pub fn register(&mut self, component: Component) -> ComponentId {
        match self.components.entry(component.name().to_string()) {
            Entry::Occupied(entry) => {
                debug!("Component {} already registered", entry.key());
                ComponentId::new(entry.index())
            }
            Entry::Vacant(entry) => {
                debug!("Registering component {}", entry.key());
                let id = ComponentId::new(entry.index());
                entry.insert(component);
                id
            }
        }
    }

    /// Look up a component by name, registering a new one if absent.
    pub fn get_or_create(&mut self, name: &str) -> ComponentId {
        match self.id_of(name) {
            Some(id) => id,
            None => self.register(Component::new(name)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    pub fn id_of(&self, name: &str) -> Option<ComponentId> {
        self.components.get_index_of(name).map(ComponentId::new)
    }

    /// Access a component by id.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this registry.
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.index()]
    }

    /// Mutable access to a component by id.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this registry.
    pub fn component_mut(&mut self, id: ComponentId) -> &mut Component {
        &mut self.components[id.index()]
    }

    /// Iterate over `(id, component)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components
            .values()
            .enumerate()
            .map(|(index, component)| (ComponentId::new(index), component))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
