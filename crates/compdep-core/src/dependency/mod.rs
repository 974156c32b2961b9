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

//! Dependency descriptors and the verdicts produced when checking them.
//!
//! A [`ComponentDependency`] states that a component needs (or would like)
//! another component of a given class somewhere relative to itself. Checking
//! it yields a [`FulfillmentResult`], which is always a value and never an
//! error: "not present" and "cannot be evaluated here" are ordinary outcomes.

use serde::{Deserialize, Serialize};

use crate::class::ClassId;

pub mod status;

/// Where the required component has to be, relative to the declaring one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyPosition {
    /// Any component of the target class on the same actor.
    AnyOnActor,
    /// Any component of the target class carrying the tag, on the same actor.
    AnyOnActorWithTag,
    /// A component of the target class below the declaring scene component.
    Child,
    /// A component of the target class carrying the tag, below the declaring
    /// scene component.
    ChildWithTag,
}

impl DependencyPosition {
    /// Whether the check needs the declaring component's scene-graph position.
    pub fn needs_tree(self) -> bool {
        matches!(self, Self::Child | Self::ChildWithTag)
    }

    /// Whether the descriptor's tag participates in the check.
    pub fn needs_tag(self) -> bool {
        matches!(self, Self::AnyOnActorWithTag | Self::ChildWithTag)
    }
}

/// Severity of a dependency. Only affects presentation, never fulfillment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    /// Absence is reported as a problem.
    #[default]
    Required,
    /// Absence is reported as information.
    Optional,
}

/// A declared dependency requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentDependency {
    /// Where the target has to be found.
    pub position: DependencyPosition,
    /// The required class. A descriptor without one cannot be evaluated.
    #[serde(default)]
    pub target: Option<ClassId>,
    /// The tag to look for; ignored by the positions that do not use tags.
    #[serde(default)]
    pub tag: String,
    /// Required or optional.
    #[serde(default)]
    pub kind: DependencyKind,
}

impl ComponentDependency {
    /// A required dependency at `position` on `target`.
    pub fn new(position: DependencyPosition, target: impl Into<ClassId>) -> Self {
        Self {
            position,
            target: Some(target.into()),
            tag: String::new(),
            kind: DependencyKind::Required,
        }
    }

    /// Requires any `target` component on the actor.
    pub fn any_on_actor(target: impl Into<ClassId>) -> Self {
        Self::new(DependencyPosition::AnyOnActor, target)
    }

    /// Requires a `target` component tagged `tag` on the actor.
    pub fn any_on_actor_with_tag(target: impl Into<ClassId>, tag: impl Into<String>) -> Self {
        Self::new(DependencyPosition::AnyOnActorWithTag, target).with_tag(tag)
    }

    /// Requires a `target` component below the declaring component.
    pub fn child(target: impl Into<ClassId>) -> Self {
        Self::new(DependencyPosition::Child, target)
    }

    /// Requires a `target` component tagged `tag` below the declaring component.
    pub fn child_with_tag(target: impl Into<ClassId>, tag: impl Into<String>) -> Self {
        Self::new(DependencyPosition::ChildWithTag, target).with_tag(tag)
    }

    /// Sets the tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Marks the dependency optional.
    pub fn optional(mut self) -> Self {
        self.kind = DependencyKind::Optional;
        self
    }

    /// Whether the dependency is optional.
    pub fn is_optional(&self) -> bool {
        self.kind == DependencyKind::Optional
    }

    /// A short label such as `Optional Child Dependency (Tag 'hand')`.
    pub fn description(&self) -> String {
        let optional = if self.is_optional() { "Optional " } else { "" };
        let child = if self.position.needs_tree() { "Child " } else { "" };
        let tag = if self.position.needs_tag() {
            format!(" (Tag '{}')", self.tag)
        } else {
            String::new()
        };
        format!("{optional}{child}Dependency{tag}")
    }
}

/// The verdict of checking one descriptor for one component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FulfillmentResult {
    /// Whether the dependency is satisfied.
    pub is_fulfilled: bool,
    /// Whether the result means anything in the current context. Hidden
    /// results must not reach the user.
    pub is_displayable: bool,
    /// Short human-readable explanation.
    pub status: String,
}

impl FulfillmentResult {
    /// A displayable, fulfilled verdict.
    pub fn fulfilled(status: impl Into<String>) -> Self {
        Self {
            is_fulfilled: true,
            is_displayable: true,
            status: status.into(),
        }
    }

    /// A displayable, unfulfilled verdict.
    pub fn unfulfilled(status: impl Into<String>) -> Self {
        Self {
            is_fulfilled: false,
            is_displayable: true,
            status: status.into(),
        }
    }

    /// An unfulfilled verdict that should be hidden from the user.
    pub fn hidden(status: impl Into<String>) -> Self {
        Self {
            is_fulfilled: false,
            is_displayable: false,
            status: status.into(),
        }
    }
}
