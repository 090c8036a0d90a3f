use serde::Serialize;

/// Handle to a component inside a [`Registry`](crate::domain::service::Registry).
///
/// Ids are registry positions. The registry never deletes, so an id stays
/// valid for the lifetime of the registry that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ComponentId(usize);

impl ComponentId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the component in registration order.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A named node in the dependency graph.
///
/// Constructing a component has no side effects; it only becomes part of a
/// graph once it is handed to `Registry::register`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    name: String,
    installed: bool,
    implicitly_installed: bool,
    dependencies: Vec<ComponentId>,
}

impl Component {
    /// Create an uninstalled component with no dependencies.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            installed: false,
            implicitly_installed: false,
            dependencies: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// True if the last installation happened only to satisfy a dependent.
    ///
    /// Only meaningful while the component is installed.
    pub fn is_implicitly_installed(&self) -> bool {
        self.implicitly_installed
    }

    /// Dependencies in declaration order. Duplicates are kept.
    pub fn dependencies(&self) -> &[ComponentId] {
        &self.dependencies
    }

    /// Append a dependency edge.
    pub fn add_dependency(&mut self, dependency: ComponentId) {
        self.dependencies.push(dependency);
    }

    /// Check whether any edge of this component points at `dependency`.
    pub fn depends_on(&self, dependency: ComponentId) -> bool {
        self.dependencies.contains(&dependency)
    }

    /// Flip to installed. The implicit flag is overwritten, never merged.
    pub fn mark_installed(&mut self, implicit: bool) {
        self.installed = true;
        self.implicitly_installed = implicit;
    }

    pub fn mark_uninstalled(&mut self) {
        self.installed = false;
    }
}
