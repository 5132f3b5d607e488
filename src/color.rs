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

//! Color utilities.
//!
//! Escapes are always written in the short `ESC [ n m` form, one attribute per sequence, so
//! that [`decolor`] can remove all of them before a line reaches the log file.

use std::borrow::Cow;

use colored::Color;

use crate::Level;

pub(crate) const RESET: &str = "\x1b[0m";
pub(crate) const DIM: &str = "\x1b[2m";

const ESC: u8 = 0x1b;

/// Colors for different log levels.
///
/// Only the eight basic and eight bright foreground colors are written. A
/// [`Color::TrueColor`] is folded to the nearest basic color, an ANSI color above 15 prints in
/// the terminal default, so every escape stays removable by [`decolor`].
#[derive(Debug, Clone)]
pub struct LevelColor {
    /// Color for ok level logs.
    pub ok: Color,
    /// Color for log level logs.
    pub log: Color,
    /// Color for info level logs.
    pub info: Color,
    /// Color for warning level logs.
    pub warn: Color,
    /// Color for error level logs.
    pub error: Color,
    /// Color for panic level logs.
    pub panic: Color,
    /// Color for debug level logs.
    pub debug: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            ok: Color::Green,
            log: Color::Blue,
            info: Color::Cyan,
            warn: Color::Yellow,
            error: Color::Red,
            panic: Color::Red,
            debug: Color::Blue,
        }
    }
}

impl LevelColor {
    /// Colorize the level tag.
    pub fn colorize_level(&self, level: Level) -> String {
        let color = match level {
            Level::Ok => self.ok,
            Level::Log => self.log,
            Level::Info => self.info,
            Level::Warn => self.warn,
            Level::Error => self.error,
            Level::Panic => self.panic,
            Level::Debug => self.debug,
        };
        paint(color, level.label())
    }
}

/// The SGR code of a foreground color, always one or two digits.
fn foreground_code(color: Color) -> u8 {
    match color {
        Color::Black => 30,
        Color::Red => 31,
        Color::Green => 32,
        Color::Yellow => 33,
        Color::Blue => 34,
        Color::Magenta => 35,
        Color::Cyan => 36,
        Color::White => 37,
        Color::BrightBlack => 90,
        Color::BrightRed => 91,
        Color::BrightGreen => 92,
        Color::BrightYellow => 93,
        Color::BrightBlue => 94,
        Color::BrightMagenta => 95,
        Color::BrightCyan => 96,
        Color::BrightWhite => 97,
        Color::AnsiColor(n @ 0..=7) => 30 + n,
        Color::AnsiColor(n @ 8..=15) => 90 + n - 8,
        Color::TrueColor { r, g, b } => {
            let bits = u8::from(r >= 128) | u8::from(g >= 128) << 1 | u8::from(b >= 128) << 2;
            30 + bits
        }
        Color::AnsiColor(_) => 39,
    }
}

pub(crate) fn foreground(color: Color) -> String {
    format!("\x1b[{}m", foreground_code(color))
}

pub(crate) fn paint(color: Color, text: &str) -> String {
    format!("{}{text}{RESET}", foreground(color))
}

pub(crate) fn dim(text: &str) -> String {
    format!("{DIM}{text}{RESET}")
}

/// Remove every `ESC [ n m` color sequence (one or two digits) from `text`.
///
/// Other escape sequences are kept. The result never contains a color sequence, so applying
/// the function twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// assert_eq!(shellog::decolor("\x1b[31mERROR\x1b[0m boom"), "ERROR boom");
/// assert_eq!(shellog::decolor("\x1b[1;31mkept\x1b[0m"), "\x1b[1;31mkept");
/// ```
pub fn decolor(text: &str) -> Cow<'_, str> {
    if !text.as_bytes().contains(&ESC) {
        return Cow::Borrowed(text);
    }

    // a removal can join the halves of another sequence, e.g. "\x1b[1\x1b[2mm", so sequences
    // are matched against the output like brackets
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        out.push(c);
        if c == 'm' {
            if let Some(len) = color_escape_suffix(out.as_bytes()) {
                out.truncate(out.len() - len);
            }
        }
    }

    if out.len() == text.len() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(out)
    }
}

/// The length of the `ESC [ n m` sequence `bytes` ends with, if any.
fn color_escape_suffix(bytes: &[u8]) -> Option<usize> {
    match bytes {
        [.., ESC, b'[', d, b'm'] if d.is_ascii_digit() => Some(4),
        [.., ESC, b'[', d1, d2, b'm'] if d1.is_ascii_digit() && d2.is_ascii_digit() => Some(5),
        _ => None,
    }
}
