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

//! Class identities and the contract of the type registry.
//!
//! There is no runtime reflection to discover classes, so every class the
//! resolver can reason about is described by a [`ClassInfo`] entry held in a
//! [`TypeRegistry`]. An entry records its single parent, the capabilities it
//! declares and, for component classes, its dependency declaration.

use std::borrow::Borrow;
use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::construction::ConstructionNode;
use crate::dependency::ComponentDependency;

/// Names of the classes every registry is expected to provide.
pub mod builtin {
    /// The root of every class hierarchy.
    pub const OBJECT: &str = "Object";
    /// Base class of every component.
    pub const ACTOR_COMPONENT: &str = "ActorComponent";
    /// Base class of components that have a place in the scene graph.
    pub const SCENE_COMPONENT: &str = "SceneComponent";
    /// Base class of every composite type that can own components.
    pub const ACTOR: &str = "Actor";
}

/// Suffix carried by the names of generated blueprint classes.
const GENERATED_CLASS_SUFFIX: &str = "_C";

/// The stable name of a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    /// Creates a class identifier from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The raw class name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The user-facing name: the class name without the generated-class suffix.
    pub fn display_name(&self) -> &str {
        self.0
            .strip_suffix(GENERATED_CLASS_SUFFIX)
            .filter(|stripped| !stripped.is_empty())
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ClassId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for ClassId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Where a class definition comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    /// Compiled into the host; registered at startup.
    #[default]
    Native,
    /// Authored as data in a project and compiled by the editor.
    Blueprint,
}

/// A capability a class can declare, checked by set membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    /// The class exposes a list of [`ComponentDependency`] descriptors.
    ComponentDependencies,
}

/// How a class's own dependency list combines with the one it inherits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyDeclaration {
    /// Replaces the inherited list entirely.
    Override(Vec<ComponentDependency>),
    /// Appends to the inherited list.
    Extend(Vec<ComponentDependency>),
}

/// Registry metadata of a single class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// The class's stable name.
    pub id: ClassId,
    /// The single parent class; `None` only for the hierarchy root.
    pub parent: Option<ClassId>,
    /// Whether the class is native or blueprint-authored.
    pub kind: ClassKind,
    /// Capabilities declared directly on this class.
    pub capabilities: Vec<Capability>,
    /// The dependency list declared directly on this class, if any.
    pub dependencies: Option<DependencyDeclaration>,
    /// Components created by this class's default instance. A name that is
    /// also declared by an ancestor replaces the ancestor's declaration.
    pub default_components: Vec<ConstructionNode>,
}

impl ClassInfo {
    /// Describes a native class with the given parent.
    pub fn native(id: impl Into<ClassId>, parent: Option<&str>) -> Self {
        Self {
            id: id.into(),
            parent: parent.map(ClassId::from),
            kind: ClassKind::Native,
            capabilities: Vec::new(),
            dependencies: None,
            default_components: Vec::new(),
        }
    }

    /// Describes a blueprint-authored class with the given parent.
    pub fn blueprint(id: impl Into<ClassId>, parent: impl Into<ClassId>) -> Self {
        Self {
            kind: ClassKind::Blueprint,
            parent: Some(parent.into()),
            ..Self::native(id, None)
        }
    }

    /// Adds a declared capability.
    pub fn with_capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Declares the class's dependencies; implies [`Capability::ComponentDependencies`].
    pub fn with_dependencies(mut self, declaration: DependencyDeclaration) -> Self {
        self.dependencies = Some(declaration);
        self.with_capability(Capability::ComponentDependencies)
    }

    /// Adds a component to the class's default instance.
    pub fn with_default_component(mut self, node: ConstructionNode) -> Self {
        self.default_components.push(node);
        self
    }

    /// Whether the capability is declared directly on this class.
    pub fn declares(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// The default instance of a class, reduced to the components it carries.
#[derive(Debug, Clone)]
pub struct DefaultObject<'a> {
    /// The class the instance belongs to.
    pub class: &'a ClassId,
    /// Attached components, each name listed once.
    pub components: Vec<&'a ConstructionNode>,
}

/// Walks a class and its ancestors, most-derived first.
pub struct Ancestors<'a, R: ?Sized> {
    registry: &'a R,
    next: Option<&'a ClassInfo>,
}

impl<'a, R: TypeRegistry + ?Sized> Iterator for Ancestors<'a, R> {
    type Item = &'a ClassInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current
            .parent
            .as_ref()
            .and_then(|parent| self.registry.class(parent));
        Some(current)
    }
}

/// The type/reflection registry contract.
///
/// Implementors only have to provide lookup and enumeration; everything that
/// follows from the single-parent chain is derived by the provided methods.
/// Implementations must guarantee the parent chain is acyclic.
pub trait TypeRegistry {
    /// Looks up a class by name.
    fn class(&self, id: &ClassId) -> Option<&ClassInfo>;

    /// Enumerates every registered class.
    fn classes(&self) -> Vec<&ClassInfo>;

    /// The class itself followed by its ancestors, most-derived first.
    /// Empty when the class is unknown.
    fn ancestors<'a>(&'a self, id: &ClassId) -> Ancestors<'a, Self> {
        Ancestors {
            registry: self,
            next: self.class(id),
        }
    }

    /// Whether `id` is `base` or descends from it.
    fn is_child_of(&self, id: &ClassId, base: &ClassId) -> bool {
        self.ancestors(id).any(|info| info.id == *base)
    }

    /// Whether `id` or one of its ancestors declares `capability`.
    fn implements(&self, id: &ClassId, capability: Capability) -> bool {
        self.ancestors(id).any(|info| info.declares(capability))
    }

    /// The full dependency list of a class, folding declarations from the
    /// least-derived ancestor down to the class itself.
    fn dependencies_of(&self, id: &ClassId) -> Vec<ComponentDependency> {
        let chain: Vec<&ClassInfo> = self.ancestors(id).collect();
        let mut dependencies = Vec::new();
        for info in chain.into_iter().rev() {
            match &info.dependencies {
                Some(DependencyDeclaration::Override(own)) => dependencies = own.clone(),
                Some(DependencyDeclaration::Extend(own)) => {
                    dependencies.extend(own.iter().cloned())
                }
                None => {}
            }
        }
        dependencies
    }

    /// The canonical default instance of a class.
    fn default_object(&self, id: &ClassId) -> Option<DefaultObject<'_>> {
        let class = self.class(id)?;
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut components = Vec::new();
        for info in self.ancestors(id) {
            for node in &info.default_components {
                if seen.insert(node.template.name.as_str()) {
                    components.push(node);
                }
            }
        }
        Some(DefaultObject {
            class: &class.id,
            components,
        })
    }
}
