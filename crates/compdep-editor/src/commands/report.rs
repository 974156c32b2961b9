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

use anyhow::Result;
use clap::Args;
use compdep_agents::{BlueprintReport, DependencyViewerAgent};

use crate::helpers::{verdict_style, Palette, CYAN};

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Project file (RON)
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Only keep blueprints whose name contains this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub filter: String,

    /// Only keep blueprints with unfulfilled required dependencies, worst first
    #[arg(long)]
    pub only_unfulfilled: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &ReportArgs, palette: &Palette) -> Result<()> {
    let project = super::load_project(&args.project)?;
    let reports = DependencyViewerAgent::new().query_blueprints(
        project.registry(),
        project.blueprints(),
        &args.filter,
        args.only_unfulfilled,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print!("{}", render(&reports, palette)?);
    }
    Ok(())
}

/// Renders the report as indented text. Results that are not meant to be
/// shown to the user are left out.
pub fn render(reports: &[BlueprintReport], palette: &Palette) -> Result<String, fmt::Error> {
    let mut out = String::new();
    if reports.is_empty() {
        out.push_str("No blueprint to report.\n");
        return Ok(out);
    }

    for report in reports {
        writeln!(
            out,
            "{} ({} unfulfilled / {} dependencies)",
            palette.bold(&report.display_name),
            report.unfulfilled_count(),
            report.dependency_count()
        )?;
        for component in &report.components {
            writeln!(
                out,
                "  {} [{}]",
                palette.paint(CYAN, &component.name),
                component.class
            )?;
            for entry in &component.dependencies {
                if !entry.result.is_displayable {
                    continue;
                }
                let target = entry
                    .dependency
                    .target
                    .as_ref()
                    .map_or("<none>", |class| class.as_str());
                let (mark, color) =
                    verdict_style(entry.result.is_fulfilled, entry.dependency.is_optional());
                writeln!(
                    out,
                    "    {} {} {}: {}",
                    palette.paint(color, mark),
                    entry.description,
                    target,
                    palette.paint(color, &entry.result.status)
                )?;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compdep_data::Project;

    const DEMO: &str = include_str!("../../assets/demo_project.ron");

    fn query(filter: &str, only_unfulfilled: bool) -> Vec<BlueprintReport> {
        let project = Project::from_ron_str(DEMO).unwrap();
        DependencyViewerAgent::new().query_blueprints(
            project.registry(),
            project.blueprints(),
            filter,
            only_unfulfilled,
        )
    }

    #[test]
    fn test_demo_ranking() {
        let reports = query("", true);

        let ranking: Vec<(&str, usize)> = reports
            .iter()
            .map(|report| (report.display_name.as_str(), report.unfulfilled_count()))
            .collect();
        assert_eq!(
            ranking,
            [("BP_Turret", 3), ("BP_Sniper", 2), ("BP_Soldier", 1)]
        );
    }

    #[test]
    fn test_demo_full_report_skips_blueprints_without_dependencies() {
        let reports = query("", false);

        let names: Vec<&str> = reports
            .iter()
            .map(|report| report.display_name.as_str())
            .collect();
        assert_eq!(
            names,
            ["BP_Enemy", "BP_Soldier", "BP_Sniper", "BP_Turret", "BP_Door"]
        );
    }

    #[test]
    fn test_render_lists_components_and_verdicts() {
        let reports = query("sniper", false);

        let text = render(&reports, &Palette::plain()).unwrap();

        assert!(text.starts_with("BP_Sniper (2 unfulfilled / 5 dependencies)\n"));
        assert!(text.contains("  Rifle [RifleComponent]\n"));
        assert!(text.contains(
            "    ✗ Child Dependency (Tag 'muzzle') ArrowComponent: Child Exists, Wrong Tag\n"
        ));
        assert!(text.contains("    ✓ Child Dependency StaticMeshComponent: Present as Child\n"));
        assert!(text.contains("    ✓ Optional Dependency (Tag 'head') HitboxComponent: Present with Tag\n"));
    }

    #[test]
    fn test_render_empty_report() {
        assert_eq!(render(&[], &Palette::plain()).unwrap(), "No blueprint to report.\n");
    }

    #[test]
    fn test_json_report_shape() {
        let reports = query("turret", false);

        let json = serde_json::to_value(&reports).unwrap();

        let turret = &json[0];
        assert_eq!(turret["class"], "BP_Turret_C");
        assert_eq!(turret["display_name"], "BP_Turret");
        let weapon = &turret["components"][0];
        assert_eq!(weapon["name"], "Weapon");
        assert_eq!(weapon["origin"], "Construction");
        assert_eq!(weapon["declared_by"], "BP_Turret_C");
        assert_eq!(weapon["dependencies"][0]["dependency"]["position"], "Child");
        assert_eq!(weapon["dependencies"][0]["result"]["is_fulfilled"], false);
        assert_eq!(weapon["dependencies"][0]["result"]["status"], "Not Present");
    }
}
