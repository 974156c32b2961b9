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

//! Agents of the component dependency resolver.
//!
//! Agents own the lanes and drive them over a whole universe of classes:
//! [`DependencyViewerAgent`] builds the project-wide report and
//! [`DependencyPanelAgent`] produces the rows of the per-component property
//! panel. Neither keeps results between calls.

#![warn(missing_docs)]

use compdep_core::lane::Lane;

pub mod panel_agent;
pub mod viewer_agent;

pub use panel_agent::{
    DependencyPanelAgent, DetailRow, PanelError, SelectedComponent, Severity,
};
pub use viewer_agent::{
    BlueprintReport, ComponentReport, DependencyReport, DependencyViewerAgent,
};

/// Describes a lane pipeline for logs, e.g.
/// `MostDerivedFirst (Collection) -> PositionalTag (Evaluation)`.
fn describe_lanes(lanes: &[&dyn Lane]) -> String {
    lanes
        .iter()
        .map(|lane| format!("{} ({})", lane.strategy_name(), lane.lane_kind()))
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_agents_drive_the_same_pipeline() {
        let viewer = DependencyViewerAgent::new();
        let panel = DependencyPanelAgent::new();

        assert_eq!(
            describe_lanes(&viewer.lanes()),
            "MostDerivedFirst (Collection) -> PositionalTag (Evaluation)"
        );
        assert_eq!(describe_lanes(&panel.lanes()), describe_lanes(&viewer.lanes()));
    }
}
