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

//! # Lane Abstraction
//!
//! A **Lane** is one algorithmic step of the resolver, owned and driven by an
//! agent. Lanes are stateless with respect to the data they process: every
//! call receives its inputs and returns a fresh result, so re-running a lane
//! after the underlying data changed never observes stale state.
//!
//! Domain-specific lanes expose their own entry points (for example
//! `collect` or `check`); this trait only carries what all of them share.

use std::fmt;

/// Classification of lanes, used for logging and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Flattens a composite type into its component set.
    Collection,
    /// Evaluates dependency descriptors against a component set.
    Evaluation,
}

impl fmt::Display for LaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKind::Collection => write!(f, "Collection"),
            LaneKind::Evaluation => write!(f, "Evaluation"),
        }
    }
}

/// The base trait shared by all lanes.
pub trait Lane: Send + Sync {
    /// Human-readable name identifying this lane's strategy.
    fn strategy_name(&self) -> &'static str;

    /// The kind of processing this lane performs.
    fn lane_kind(&self) -> LaneKind;
}
