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

//! # CompDep Core
//!
//! Foundational crate containing the types and interface contracts shared by
//! every layer of the component dependency resolver: class identities and the
//! type registry contract, dependency descriptors and their verdicts, and the
//! construction-graph records a composite type is assembled from.

#![warn(missing_docs)]

pub mod class;
pub mod construction;
pub mod dependency;
pub mod graph;
pub mod lane;

pub use class::{Capability, ClassId, ClassInfo, ClassKind, TypeRegistry};
pub use construction::{ComponentSet, ComponentView, ConstructionGraphStore};
pub use dependency::{ComponentDependency, DependencyKind, DependencyPosition, FulfillmentResult};
