// Copyright 2024 FastLabs Developers
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

use std::fmt;

use colored::Color;

/// The level of a log line.
///
/// Unlike most logging frameworks, levels here are not ordered by severity and cannot be
/// filtered: every call is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// A successful step.
    Ok,
    /// A plain log line.
    Log,
    /// An informational line.
    Info,
    /// A warning.
    Warn,
    /// An error the program can continue from.
    Error,
    /// A fatal error; the line is surrounded by blank lines.
    Panic,
    /// A named debug line.
    Debug,
}

impl Level {
    /// All levels in declaration order.
    pub const ALL: [Level; 7] = [
        Level::Ok,
        Level::Log,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Panic,
        Level::Debug,
    ];

    /// The tag printed at the start of the line.
    pub fn label(self) -> &'static str {
        match self {
            Level::Ok => "OK",
            Level::Log => "LOG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Panic => "PANIC!!",
            Level::Debug => "DEBUG",
        }
    }

    pub(crate) fn source_color(self) -> Color {
        match self {
            Level::Warn => Color::Blue,
            Level::Panic => Color::Red,
            _ => Color::Yellow,
        }
    }

    pub(crate) fn payload_color(self) -> Option<Color> {
        match self {
            Level::Panic => Some(Color::Red),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let labels = Level::ALL.map(|level| level.to_string());
        assert_eq!(
            labels,
            ["OK", "LOG", "INFO", "WARN", "ERROR", "PANIC!!", "DEBUG"]
        );
    }

    #[test]
    fn test_source_colors() {
        assert_eq!(Level::Warn.source_color(), Color::Blue);
        assert_eq!(Level::Panic.source_color(), Color::Red);
        assert_eq!(Level::Info.source_color(), Color::Yellow);
        assert_eq!(Level::Panic.payload_color(), Some(Color::Red));
        assert_eq!(Level::Error.payload_color(), None);
    }
}
