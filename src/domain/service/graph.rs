//! Graph engine - install and remove state machines over the registry.
//!
//! Edges mean "requires". Installing a component first installs every
//! dependency that is not installed yet, depth-first in declaration order,
//! marking those as implicit. Removing a component is refused while another
//! installed component requires it; a successful removal then tries to remove
//! each of its dependencies in turn, under the same guard.
//!
//! Both traversals use explicit work stacks. Install builds its whole plan
//! before touching any state, so a rejected install changes nothing.

use std::collections::HashSet;

use log::{debug, info, warn};
use thiserror::Error;

use crate::domain::model::{Component, ComponentId, InstallOutcome, Installation, RemoveOutcome};

use super::Registry;

/// What to do when an install traversal reaches a component that is already
/// on its own path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Fail the install with [`GraphError::CyclicDependency`].
    #[default]
    Reject,
    /// Treat the back edge as satisfied and keep going.
    Ignore,
}

/// Which dependencies a successful removal may take down with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CascadePolicy {
    /// Any dependency no other installed component still needs.
    #[default]
    All,
    /// Only implicitly installed dependencies no other installed component
    /// still needs.
    ImplicitOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphOptions {
    pub cycles: CyclePolicy,
    pub cascade: CascadePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("cyclic dependency detected while installing {component}: {}", .cycle.join(" -> "))]
    CyclicDependency {
        component: String,
        /// Path from the repeated component back to itself
        cycle: Vec<String>,
    },
}

/// One pending component in the install traversal.
struct Frame {
    id: ComponentId,
    implicit: bool,
    /// Index of the next dependency to visit
    next: usize,
}

/// Dependency graph with install state.
#[derive(Debug, Default, Clone)]
pub struct GraphEngine {
    registry: Registry,
    options: GraphOptions,
}

impl GraphEngine {
    /// Create an engine over an empty registry.
    pub fn new(options: GraphOptions) -> Self {
        Self::with_registry(Registry::new(), options)
    }

    /// Create an engine over an existing registry.
    pub fn with_registry(registry: Registry, options: GraphOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.registry.get(name)
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.component(name).is_some_and(Component::is_installed)
    }

    /// Make sure a component exists without adding any edge.
    pub fn declare(&mut self, name: &str) -> ComponentId {
        self.registry.get_or_create(name)
    }

    /// Record that `owner` requires `dependency`, creating either if needed.
    ///
    /// Edges are never checked for cycles here.
    pub fn add_dependency(&mut self, owner: &str, dependency: &str) {
        let owner_id = self.registry.get_or_create(owner);
        let dependency_id = self.registry.get_or_create(dependency);
        self.registry
            .component_mut(owner_id)
            .add_dependency(dependency_id);
        debug!("{} depends on {}", owner, dependency);
    }

    /// Explicitly install a component and everything it needs.
    pub fn install(&mut self, name: &str) -> Result<InstallOutcome, GraphError> {
        self.install_component(name, false)
    }

    /// Install a component and every missing transitive dependency.
    ///
    /// Dependencies installed along the way are marked implicit. The target
    /// gets `implicit` as its flag, replacing whatever it held before.
    pub fn install_component(
        &mut self,
        name: &str,
        implicit: bool,
    ) -> Result<InstallOutcome, GraphError> {
        let target = self.registry.get_or_create(name);
        if self.registry.component(target).is_installed() {
            debug!("{} is already installed", name);
            return Ok(InstallOutcome::AlreadyInstalled {
                name: name.to_string(),
            });
        }

        let plan = self.plan_install(target, implicit)?;
        debug!("Install plan for {} has {} step(s)", name, plan.len());

        let mut installed = Vec::with_capacity(plan.len());
        for (id, implicit) in plan {
            let component = self.registry.component_mut(id);
            component.mark_installed(implicit);
            info!("Installed {} (implicit: {})", component.name(), implicit);
            installed.push(Installation {
                name: component.name().to_string(),
                implicit,
            });
        }

        Ok(InstallOutcome::Installed { installed })
    }

    /// Post-order walk from `target`: every component appears after all of
    /// the dependencies it causes to be installed.
    fn plan_install(
        &self,
        target: ComponentId,
        implicit: bool,
    ) -> Result<Vec<(ComponentId, bool)>, GraphError> {
        let mut plan = Vec::new();
        let mut scheduled = HashSet::new();
        let mut on_path = HashSet::from([target]);
        let mut stack = vec![Frame {
            id: target,
            implicit,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let dependencies = self.registry.component(frame.id).dependencies();
            let Some(&dependency) = dependencies.get(frame.next) else {
                let (id, implicit) = (frame.id, frame.implicit);
                stack.pop();
                on_path.remove(&id);
                scheduled.insert(id);
                plan.push((id, implicit));
                continue;
            };
            frame.next += 1;

            if self.registry.component(dependency).is_installed()
                || scheduled.contains(&dependency)
            {
                continue;
            }

            if on_path.contains(&dependency) {
                let cycle = self.cycle_path(&stack, dependency);
                match self.options.cycles {
                    CyclePolicy::Reject => {
                        return Err(GraphError::CyclicDependency {
                            component: self.registry.component(target).name().to_string(),
                            cycle,
                        });
                    }
                    CyclePolicy::Ignore => {
                        warn!("Ignoring cyclic dependency {}", cycle.join(" -> "));
                        continue;
                    }
                }
            }

            on_path.insert(dependency);
            stack.push(Frame {
                id: dependency,
                implicit: true,
                next: 0,
            });
        }

        Ok(plan)
    }

    fn cycle_path(&self, stack: &[Frame], repeated: ComponentId) -> Vec<String> {
        let start = stack
            .iter()
            .position(|frame| frame.id == repeated)
            .unwrap_or(0);
        stack[start..]
            .iter()
            .map(|frame| frame.id)
            .chain(std::iter::once(repeated))
            .map(|id| self.registry.component(id).name().to_string())
            .collect()
    }

    /// Remove a component if nothing installed still needs it, then try to
    /// remove its dependencies the same way.
    pub fn remove(&mut self, name: &str) -> RemoveOutcome {
        let target = self.registry.get_or_create(name);
        if !self.registry.component(target).is_installed() {
            debug!("{} is not installed", name);
            return RemoveOutcome::NotInstalled {
                name: name.to_string(),
            };
        }

        let needed_by = self.dependents_of(target);
        if !needed_by.is_empty() {
            debug!("{} is still needed by {:?}", name, needed_by);
            return RemoveOutcome::StillNeeded {
                name: name.to_string(),
                needed_by,
            };
        }

        self.registry.component_mut(target).mark_uninstalled();
        info!("Removed {}", name);

        let cascaded = self.cascade_remove(target);
        RemoveOutcome::Removed {
            name: name.to_string(),
            cascaded,
        }
    }

    /// Depth-first over the dependencies of a just-removed component, in
    /// declaration order. Refusals are dropped silently.
    fn cascade_remove(&mut self, root: ComponentId) -> Vec<String> {
        let mut removed = Vec::new();
        let mut pending: Vec<ComponentId> = self
            .registry
            .component(root)
            .dependencies()
            .iter()
            .rev()
            .copied()
            .collect();

        while let Some(id) = pending.pop() {
            let component = self.registry.component(id);
            if !component.is_installed() {
                continue;
            }
            if self.options.cascade == CascadePolicy::ImplicitOnly
                && !component.is_implicitly_installed()
            {
                debug!("Keeping {}: explicitly installed", component.name());
                continue;
            }
            if !self.dependents_of(id).is_empty() {
                debug!("Keeping {}: still needed", component.name());
                continue;
            }

            let component = self.registry.component_mut(id);
            component.mark_uninstalled();
            info!("Removed {} (cascade)", component.name());
            removed.push(component.name().to_string());
            pending.extend(component.dependencies().iter().rev().copied());
        }

        removed
    }

    /// Names of installed components whose dependency list contains `name`,
    /// in registry order.
    pub fn needed_by(&self, name: &str) -> Vec<String> {
        match self.registry.id_of(name) {
            Some(id) => self.dependents_of(id),
            None => Vec::new(),
        }
    }

    fn dependents_of(&self, id: ComponentId) -> Vec<String> {
        self.registry
            .iter()
            .filter(|(_, component)| component.is_installed() && component.depends_on(id))
            .map(|(_, component)| component.name().to_string())
            .collect()
    }

    /// Names of every installed component, in registry order.
    pub fn list(&self) -> Vec<String> {
        self.registry
            .iter()
            .filter(|(_, component)| component.is_installed())
            .map(|(_, component)| component.name().to_string())
            .collect()
    }
}
