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

//! Construction-graph records and the store that owns them.
//!
//! A composite type (an actor blueprint) is assembled from three sources:
//! the components of its class's default instance, the nodes of its own
//! construction graph, and override templates it holds for nodes declared by
//! its ancestors. This module defines those records and the read-only
//! [`ConstructionGraphStore`] contract used to query them.

use serde::{Deserialize, Serialize};

use crate::class::ClassId;

mod component_set;

pub use component_set::*;

/// The properties of a component as authored: its stable name, its class and
/// its tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentTemplate {
    /// Stable name, unique within one composite type.
    pub name: String,
    /// Concrete class of the component.
    pub class: ClassId,
    /// Labels attached in the scene editor.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ComponentTemplate {
    /// A template without tags.
    pub fn new(name: impl Into<String>, class: impl Into<ClassId>) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            tags: Vec::new(),
        }
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Whether the component carries `tag`. Tags compare ASCII
    /// case-insensitively and the empty tag never matches.
    pub fn has_tag(&self, tag: &str) -> bool {
        !tag.is_empty() && self.tags.iter().any(|own| own.eq_ignore_ascii_case(tag))
    }
}

/// A component declaration together with its place in the scene graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstructionNode {
    /// The declared component.
    pub template: ComponentTemplate,
    /// Stable name of the component this one is attached to, if any.
    #[serde(default)]
    pub parent: Option<String>,
}

impl ConstructionNode {
    /// A root node.
    pub fn new(template: ComponentTemplate) -> Self {
        Self {
            template,
            parent: None,
        }
    }

    /// Attaches the node below the component named `parent`.
    pub fn attached_to(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// A template held by a derived composite type that overrides the properties
/// of a node declared by one of its ancestors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InheritedOverride {
    /// The ancestor whose construction graph declares the overridden node.
    pub owner: ClassId,
    /// The overriding template; its name is the overridden node's name.
    pub template: ComponentTemplate,
}

/// The construction-graph store contract.
///
/// Only the composite types' own records are required; override resolution
/// across the chain is derived by the provided methods.
pub trait ConstructionGraphStore {
    /// Every composite type the store knows about.
    fn composite_types(&self) -> Vec<&ClassId>;

    /// The nodes declared directly by `class`, in declaration order.
    /// `None` when `class` has no construction graph.
    fn construction_nodes(&self, class: &ClassId) -> Option<&[ConstructionNode]>;

    /// The override templates held directly by `class`.
    fn inherited_overrides(&self, class: &ClassId) -> &[InheritedOverride];

    /// The parent of `class` when that parent is itself a composite type
    /// known to the store.
    fn composite_parent(&self, class: &ClassId) -> Option<&ClassId>;

    /// Finds the node named `name` declared by `owner`.
    fn find_node(&self, owner: &ClassId, name: &str) -> Option<&ConstructionNode> {
        self.construction_nodes(owner)?
            .iter()
            .find(|node| node.template.name == name)
    }

    /// The template that `node`, declared by `owner`, realizes when built as
    /// part of `class`: the nearest override found walking from `class` up to
    /// `owner`, or the node's own template.
    fn actual_template<'a>(
        &'a self,
        class: &ClassId,
        owner: &ClassId,
        node: &'a ConstructionNode,
    ) -> &'a ComponentTemplate {
        let mut current = Some(class);
        while let Some(candidate) = current {
            let found = self
                .inherited_overrides(candidate)
                .iter()
                .find(|record| record.owner == *owner && record.template.name == node.template.name);
            if let Some(record) = found {
                return &record.template;
            }
            if candidate == owner {
                break;
            }
            current = self.composite_parent(candidate);
        }
        &node.template
    }
}
