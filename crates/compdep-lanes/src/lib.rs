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

//! Lanes of the component dependency resolver.
//!
//! - [`ComponentCollectionLane`] flattens a composite type into its
//!   deduplicated component set.
//! - [`DependencyCheckLane`] evaluates one dependency descriptor against such
//!   a set.
//!
//! Both are pure with respect to their inputs and hold no cache.

#![warn(missing_docs)]

pub mod collection_lane;
pub mod dependency_lane;

pub use collection_lane::ComponentCollectionLane;
pub use dependency_lane::{DependencyCheckLane, SourceComponent};
