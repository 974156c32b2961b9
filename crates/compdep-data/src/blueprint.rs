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

//! Storage of blueprint construction graphs.

use ahash::AHashMap;
use compdep_core::class::ClassId;
use compdep_core::construction::{ConstructionGraphStore, ConstructionNode, InheritedOverride};

/// The construction data of one blueprint class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlueprintClass {
    /// The generated class.
    pub id: ClassId,
    /// The class the blueprint derives from, native or blueprint.
    pub parent: ClassId,
    /// Nodes declared by this blueprint, in declaration order.
    pub construction_script: Vec<ConstructionNode>,
    /// Overrides of nodes declared by ancestor blueprints.
    pub inherited_overrides: Vec<InheritedOverride>,
}

impl BlueprintClass {
    /// A blueprint with an empty construction graph.
    pub fn new(id: impl Into<ClassId>, parent: impl Into<ClassId>) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            construction_script: Vec::new(),
            inherited_overrides: Vec::new(),
        }
    }

    /// Appends a node to the construction graph.
    pub fn with_node(mut self, node: ConstructionNode) -> Self {
        self.construction_script.push(node);
        self
    }

    /// Adds an override of an ancestor's node.
    pub fn with_override(mut self, record: InheritedOverride) -> Self {
        self.inherited_overrides.push(record);
        self
    }
}

/// Every blueprint of a project, keyed by generated class.
#[derive(Debug, Default, Clone)]
pub struct BlueprintLibrary {
    blueprints: AHashMap<ClassId, BlueprintClass>,
    order: Vec<ClassId>,
}

impl BlueprintLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a blueprint, replacing any previous version with the same class.
    /// Returns the replaced version.
    pub fn insert(&mut self, blueprint: BlueprintClass) -> Option<BlueprintClass> {
        let id = blueprint.id.clone();
        let previous = self.blueprints.insert(id.clone(), blueprint);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    /// Looks a blueprint up by class.
    pub fn get(&self, id: &ClassId) -> Option<&BlueprintClass> {
        self.blueprints.get(id)
    }

    /// Number of blueprints.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl ConstructionGraphStore for BlueprintLibrary {
    fn composite_types(&self) -> Vec<&ClassId> {
        self.order.iter().collect()
    }

    fn construction_nodes(&self, class: &ClassId) -> Option<&[ConstructionNode]> {
        self.blueprints
            .get(class)
            .map(|blueprint| blueprint.construction_script.as_slice())
    }

    fn inherited_overrides(&self, class: &ClassId) -> &[InheritedOverride] {
        self.blueprints
            .get(class)
            .map(|blueprint| blueprint.inherited_overrides.as_slice())
            .unwrap_or(&[])
    }

    fn composite_parent(&self, class: &ClassId) -> Option<&ClassId> {
        let parent = &self.blueprints.get(class)?.parent;
        self.blueprints.contains_key(parent).then_some(parent)
    }
}
