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

// Command-line front end of the component dependency resolver.
// Run with: compdep-editor <command> <project.ron> ...

mod commands;
mod helpers;

use clap::{Parser, Subcommand};

use crate::commands::inspect::InspectArgs;
use crate::commands::report::ReportArgs;
use crate::helpers::{print_error, Palette};

#[derive(Parser)]
#[command(name = "compdep-editor")]
#[command(about = "Checks component dependencies across the blueprints of a project")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every actor blueprint with its dependency results
    Report(ReportArgs),
    /// Show the dependency panel of one component of a blueprint
    Inspect(InspectArgs),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let palette = Palette::detect();

    let result = match &cli.command {
        Command::Report(args) => commands::report::run(args, &palette),
        Command::Inspect(args) => commands::inspect::run(args, &palette),
    };

    if let Err(e) = result {
        print_error(&palette, &format!("{e:#}"));
        std::process::exit(1);
    }
}
