// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The agent behind the per-component "Dependencies" panel.
//!
//! The host asks the agent to register a panel customization for every class
//! that declares dependencies, and to rebuild that set whenever a blueprint
//! that declares dependencies is recompiled. When a single component template
//! is selected, the agent produces one row per displayable dependency.

use std::fmt;

use compdep_core::class::{builtin, Capability, ClassId, TypeRegistry};
use compdep_core::construction::ConstructionGraphStore;
use compdep_core::lane::Lane;
use compdep_lanes::{ComponentCollectionLane, DependencyCheckLane, SourceComponent};

/// An error raised while registering panel customizations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// The class declares dependencies but is not a component class.
    NotAComponent(ClassId),
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::NotAComponent(class) => write!(
                f,
                "{class} is not an ActorComponent but is trying to implement component dependencies!"
            ),
        }
    }
}

impl std::error::Error for PanelError {}

/// How a row should be colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Fulfilled, or optional.
    Success,
    /// A required dependency that is not fulfilled.
    Error,
}

/// One row of the dependency panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    /// The descriptor label, e.g. `Child Dependency (Tag 'hand')`.
    pub description: String,
    /// The required class.
    pub class_name: String,
    /// The verdict text.
    pub status: String,
    /// Row coloring.
    pub severity: Severity,
}

/// An object selected in the host's details view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedComponent<'a> {
    /// Stable name of the component.
    pub name: &'a str,
    /// Exact class of the component.
    pub class: &'a ClassId,
    /// The composite type being edited, if any.
    pub owner: Option<&'a ClassId>,
    /// Whether the object is a template edited in a blueprint, as opposed to
    /// a component of a placed actor.
    pub is_template: bool,
}

/// Drives the dependency panel.
#[derive(Debug, Default)]
pub struct DependencyPanelAgent {
    registered: Vec<ClassId>,
    collection: ComponentCollectionLane,
    check: DependencyCheckLane,
}

impl DependencyPanelAgent {
    /// Creates an agent with no registered customization.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lanes the agent drives, in pipeline order.
    pub fn lanes(&self) -> [&dyn Lane; 2] {
        [&self.collection, &self.check]
    }

    /// Registers a customization for every class that declares dependencies.
    /// Returns the number of registered classes.
    ///
    /// Nothing is registered if one of those classes is not a component.
    pub fn register_customizations<R>(&mut self, registry: &R) -> Result<usize, PanelError>
    where
        R: TypeRegistry + ?Sized,
    {
        let component = ClassId::from(builtin::ACTOR_COMPONENT);
        let mut registered = Vec::new();
        for info in registry.classes() {
            if !registry.implements(&info.id, Capability::ComponentDependencies) {
                continue;
            }
            if !registry.is_child_of(&info.id, &component) {
                return Err(PanelError::NotAComponent(info.id.clone()));
            }
            registered.push(info.id.clone());
        }

        for class in registered {
            if !self.registered.contains(&class) {
                self.registered.push(class);
            }
        }
        log::info!(
            "DependencyPanelAgent: Registered {} customizations over {}",
            self.registered.len(),
            crate::describe_lanes(&self.lanes())
        );
        Ok(self.registered.len())
    }

    /// Removes every registered customization.
    pub fn unregister_customizations(&mut self) {
        log::debug!(
            "DependencyPanelAgent: Unregistering {} customizations",
            self.registered.len()
        );
        self.registered.clear();
    }

    /// Rebuilds the registered customizations from the current registry.
    pub fn reload_customizations<R>(&mut self, registry: &R) -> Result<usize, PanelError>
    where
        R: TypeRegistry + ?Sized,
    {
        self.unregister_customizations();
        self.register_customizations(registry)
    }

    /// Host notification that `class` was recompiled. Reloads only when the
    /// class declares dependencies; returns whether a reload happened.
    pub fn on_blueprint_compiled<R>(
        &mut self,
        registry: &R,
        class: &ClassId,
    ) -> Result<bool, PanelError>
    where
        R: TypeRegistry + ?Sized,
    {
        if !registry.implements(class, Capability::ComponentDependencies) {
            return Ok(false);
        }
        log::info!("DependencyPanelAgent: '{class}' was compiled, reloading");
        self.reload_customizations(registry)?;
        Ok(true)
    }

    /// Classes with a registered customization.
    pub fn registered_classes(&self) -> &[ClassId] {
        &self.registered
    }

    /// Whether a customization is registered for exactly `class`.
    pub fn is_registered(&self, class: &ClassId) -> bool {
        self.registered.contains(class)
    }

    /// Builds the panel rows for the current selection.
    ///
    /// Rows are only produced for a single selected template whose exact
    /// class has a registered customization. Descriptors without a target and
    /// results that cannot be displayed in the current context are skipped.
    pub fn customize_details<R, S>(
        &self,
        registry: &R,
        store: &S,
        selection: &[SelectedComponent<'_>],
    ) -> Vec<DetailRow>
    where
        R: TypeRegistry + ?Sized,
        S: ConstructionGraphStore + ?Sized,
    {
        let [selected] = selection else {
            return Vec::new();
        };
        if !selected.is_template || !self.is_registered(selected.class) {
            return Vec::new();
        }

        let components = selected
            .owner
            .map(|owner| self.collection.collect(registry, store, owner));
        let source = SourceComponent::new(selected.name, selected.class);

        let mut rows = Vec::new();
        for dependency in registry.dependencies_of(selected.class) {
            let Some(target) = dependency.target.as_ref() else {
                continue;
            };
            let result = self
                .check
                .check(registry, source, &dependency, components.as_ref());
            if !result.is_displayable {
                continue;
            }
            let severity = if result.is_fulfilled || dependency.is_optional() {
                Severity::Success
            } else {
                Severity::Error
            };
            rows.push(DetailRow {
                description: dependency.description(),
                class_name: target.as_str().to_owned(),
                status: result.status,
                severity,
            });
        }
        rows
    }
}
