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

// ANSI color codes
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

// Visual symbols
pub const CHECK: &str = "✓";
pub const CROSS: &str = "✗";
pub const INFO: &str = "•";

/// Applies ANSI styles unless coloring is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Colors unless `NO_COLOR` is set to a non-empty value.
    pub fn detect() -> Self {
        let disabled = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        Self { enabled: !disabled }
    }

    /// Never colors.
    #[cfg(test)]
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn paint(&self, style: &str, text: &str) -> String {
        if self.enabled {
            format!("{style}{text}{RESET}")
        } else {
            text.to_owned()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }
}

/// The mark and color of a verdict line.
pub fn verdict_style(is_fulfilled: bool, is_optional: bool) -> (&'static str, &'static str) {
    if is_fulfilled {
        (CHECK, GREEN)
    } else if is_optional {
        (INFO, YELLOW)
    } else {
        (CROSS, RED)
    }
}

pub fn print_error(palette: &Palette, message: &str) {
    eprintln!("{}", palette.paint(RED, &format!("{CROSS} {message}")));
}
