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

//! The agent behind the project-wide dependency viewer.
//!
//! For every actor blueprint in a store, the agent flattens the blueprint's
//! components, evaluates the dependencies of every component class that
//! declares some, and returns the results grouped per blueprint. The report
//! can be narrowed with a display-name filter and reduced to the blueprints
//! that still have unfulfilled required dependencies, worst first.

use std::cmp::Reverse;

use compdep_core::class::{builtin, Capability, ClassId, TypeRegistry};
use compdep_core::construction::{ComponentOrigin, ConstructionGraphStore};
use compdep_core::dependency::{ComponentDependency, FulfillmentResult};
use compdep_core::lane::Lane;
use compdep_lanes::{ComponentCollectionLane, DependencyCheckLane, SourceComponent};
use serde::Serialize;

/// The result of checking one dependency of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    /// The short label of the descriptor, e.g. `Optional Child Dependency`.
    pub description: String,
    /// The checked descriptor.
    pub dependency: ComponentDependency,
    /// The verdict.
    pub result: FulfillmentResult,
}

impl DependencyReport {
    /// Whether this is a required dependency that is not fulfilled.
    pub fn is_unfulfilled_required(&self) -> bool {
        !self.dependency.is_optional() && !self.result.is_fulfilled
    }
}

/// The dependency results of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentReport {
    /// Stable name of the component.
    pub name: String,
    /// Concrete class of the component.
    pub class: ClassId,
    /// The layer of the blueprint the component was collected from.
    pub origin: ComponentOrigin,
    /// The class in the blueprint's chain that declared the component.
    pub declared_by: ClassId,
    /// One entry per declared dependency, in declaration order.
    pub dependencies: Vec<DependencyReport>,
}

impl ComponentReport {
    /// Number of required dependencies that are not fulfilled.
    pub fn unfulfilled_count(&self) -> usize {
        self.dependencies
            .iter()
            .filter(|report| report.is_unfulfilled_required())
            .count()
    }
}

/// The dependency results of one blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlueprintReport {
    /// The blueprint's generated class.
    pub class: ClassId,
    /// The user-facing name of the blueprint.
    pub display_name: String,
    /// Components declaring at least one dependency, in collection order.
    pub components: Vec<ComponentReport>,
}

impl BlueprintReport {
    /// Number of required dependencies that are not fulfilled, over all components.
    pub fn unfulfilled_count(&self) -> usize {
        self.components
            .iter()
            .map(ComponentReport::unfulfilled_count)
            .sum()
    }

    /// Number of checked dependencies, over all components.
    pub fn dependency_count(&self) -> usize {
        self.components
            .iter()
            .map(|component| component.dependencies.len())
            .sum()
    }
}

/// Builds dependency reports over every actor blueprint of a store.
#[derive(Debug, Default, Clone, Copy)]
pub struct DependencyViewerAgent {
    collection: ComponentCollectionLane,
    check: DependencyCheckLane,
}

impl DependencyViewerAgent {
    /// Creates the agent with its lanes.
    pub fn new() -> Self {
        Self {
            collection: ComponentCollectionLane::new(),
            check: DependencyCheckLane::new(),
        }
    }

    /// The lanes the agent drives, in pipeline order.
    pub fn lanes(&self) -> [&dyn Lane; 2] {
        [&self.collection, &self.check]
    }

    /// Reports every actor blueprint that has at least one component
    /// declaring dependencies.
    ///
    /// A non-empty `filter` keeps the blueprints whose display name contains
    /// it, ignoring case. With `only_unfulfilled`, blueprints without
    /// unfulfilled required dependencies are dropped and the rest are sorted
    /// by that count, highest first; equal counts keep store order.
    pub fn query_blueprints<R, S>(
        &self,
        registry: &R,
        store: &S,
        filter: &str,
        only_unfulfilled: bool,
    ) -> Vec<BlueprintReport>
    where
        R: TypeRegistry + ?Sized,
        S: ConstructionGraphStore + ?Sized,
    {
        let actor = ClassId::from(builtin::ACTOR);
        let candidates: Vec<&ClassId> = store
            .composite_types()
            .into_iter()
            .filter(|class| registry.is_child_of(class, &actor))
            .collect();
        let scanned = candidates.len();

        let mut reports: Vec<BlueprintReport> = candidates
            .into_iter()
            .filter_map(|class| self.report_blueprint(registry, store, class))
            .collect();

        if !filter.is_empty() {
            let needle = filter.to_lowercase();
            reports.retain(|report| report.display_name.to_lowercase().contains(&needle));
        }

        if only_unfulfilled {
            reports.retain(|report| report.unfulfilled_count() > 0);
            reports.sort_by_key(|report| Reverse(report.unfulfilled_count()));
        }

        log::debug!(
            "DependencyViewerAgent: Scanned {scanned} actor blueprints through {}, reporting {}",
            crate::describe_lanes(&self.lanes()),
            reports.len()
        );
        reports
    }

    /// Reports a single blueprint. Returns `None` when none of its
    /// components declares a dependency.
    pub fn report_blueprint<R, S>(
        &self,
        registry: &R,
        store: &S,
        class: &ClassId,
    ) -> Option<BlueprintReport>
    where
        R: TypeRegistry + ?Sized,
        S: ConstructionGraphStore + ?Sized,
    {
        let set = self.collection.collect(registry, store, class);

        let mut components = Vec::new();
        for view in &set {
            if !registry.implements(view.class(), Capability::ComponentDependencies) {
                continue;
            }
            let source = SourceComponent::new(view.name(), view.class());
            let dependencies: Vec<DependencyReport> = registry
                .dependencies_of(view.class())
                .into_iter()
                .map(|dependency| DependencyReport {
                    description: dependency.description(),
                    result: self.check.check(registry, source, &dependency, Some(&set)),
                    dependency,
                })
                .collect();
            if dependencies.is_empty() {
                continue;
            }
            components.push(ComponentReport {
                name: view.name().to_owned(),
                class: view.class().clone(),
                origin: view.origin,
                declared_by: view.declared_by.clone(),
                dependencies,
            });
        }

        if components.is_empty() {
            return None;
        }
        let owner = set.owner();
        Some(BlueprintReport {
            class: owner.clone(),
            display_name: owner.display_name().to_owned(),
            components,
        })
    }
}
