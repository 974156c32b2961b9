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

use std::fmt::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use compdep_agents::{DependencyPanelAgent, DetailRow, SelectedComponent, Severity};
use compdep_core::class::ClassId;
use compdep_data::Project;
use compdep_lanes::ComponentCollectionLane;

use crate::helpers::{Palette, CHECK, CROSS, GREEN, RED};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Project file (RON)
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Blueprint class, with or without the `_C` suffix
    pub blueprint: String,

    /// Stable name of the component inside the blueprint
    pub component: String,
}

pub fn run(args: &InspectArgs, palette: &Palette) -> Result<()> {
    let project = super::load_project(&args.project)?;
    let rows = inspect(&project, &args.blueprint, &args.component)?;

    println!(
        "{}",
        palette.bold(&format!("{} / {}", args.blueprint, args.component))
    );
    print!("{}", render(&rows, palette)?);
    Ok(())
}

/// Builds the panel rows of `component` as edited in `blueprint`.
pub fn inspect(project: &Project, blueprint: &str, component: &str) -> Result<Vec<DetailRow>> {
    let Some(owner) = resolve_blueprint(project, blueprint) else {
        bail!("Blueprint '{blueprint}' is not part of the project");
    };

    let set = ComponentCollectionLane::new().collect(project.registry(), project.blueprints(), &owner);
    let Some(view) = set.get(component) else {
        bail!("Blueprint '{owner}' has no component named '{component}'");
    };

    let mut panel = DependencyPanelAgent::new();
    panel.register_customizations(project.registry())?;

    let selection = [SelectedComponent {
        name: view.name(),
        class: view.class(),
        owner: Some(&owner),
        is_template: true,
    }];
    Ok(panel.customize_details(project.registry(), project.blueprints(), &selection))
}

fn resolve_blueprint(project: &Project, name: &str) -> Option<ClassId> {
    [ClassId::from(name), ClassId::from(format!("{name}_C"))]
        .into_iter()
        .find(|class| project.blueprints().get(class).is_some())
}

pub fn render(rows: &[DetailRow], palette: &Palette) -> Result<String, fmt::Error> {
    let mut out = String::new();
    if rows.is_empty() {
        out.push_str("No dependency to show.\n");
        return Ok(out);
    }
    for row in rows {
        let (mark, color) = match row.severity {
            Severity::Success => (CHECK, GREEN),
            Severity::Error => (CROSS, RED),
        };
        writeln!(
            out,
            "  {} {:<40} {:<24} {}",
            palette.paint(color, mark),
            row.description,
            row.class_name,
            palette.paint(color, &row.status)
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compdep_core::dependency::status;

    const DEMO: &str = include_str!("../../assets/demo_project.ron");

    #[test]
    fn test_inspect_sniper_rifle() {
        let project = Project::from_ron_str(DEMO).unwrap();

        let rows = inspect(&project, "BP_Sniper", "Rifle").unwrap();

        let statuses: Vec<(&str, Severity)> = rows
            .iter()
            .map(|row| (row.status.as_str(), row.severity))
            .collect();
        assert_eq!(
            statuses,
            [
                (status::PRESENT_AS_CHILD, Severity::Success),
                (status::CHILD_EXISTS_WRONG_TAG, Severity::Error),
                (status::NOT_PRESENT, Severity::Error),
            ]
        );
        assert_eq!(rows[2].class_name, "AmmoComponent");
    }

    #[test]
    fn test_inspect_accepts_generated_class_name() {
        let project = Project::from_ron_str(DEMO).unwrap();

        let rows = inspect(&project, "BP_Door_C", "Interaction").unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, status::PRESENT_WITH_TAG);
    }

    #[test]
    fn test_inspect_component_without_dependencies_has_no_rows() {
        let project = Project::from_ron_str(DEMO).unwrap();

        let rows = inspect(&project, "BP_Crate", "Mesh").unwrap();

        assert!(rows.is_empty());
        assert_eq!(render(&rows, &Palette::plain()).unwrap(), "No dependency to show.\n");
    }

    #[test]
    fn test_inspect_unknown_names_fail() {
        let project = Project::from_ron_str(DEMO).unwrap();

        let err = inspect(&project, "BP_Ghost", "Rifle").unwrap_err();
        assert!(err.to_string().contains("BP_Ghost"));

        let err = inspect(&project, "BP_Sniper", "Scope").unwrap_err();
        assert!(err.to_string().contains("Scope"));
    }
}
