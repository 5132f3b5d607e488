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

use colored::Color;

use crate::color::RESET;
use crate::color::foreground;

/// Where a log line comes from, printed as a bracketed tag such as `[http]`.
///
/// A sequence of segments is joined with single spaces. An empty string means "no source",
/// while an empty sequence still prints `[]`.
///
/// # Examples
///
/// ```
/// use shellog::Source;
///
/// assert_eq!(Source::from("db").as_str(), Some("db"));
/// assert_eq!(Source::from(["db", "pool"]).as_str(), Some("db pool"));
/// assert_eq!(Source::from("").as_str(), None);
/// assert_eq!(Source::none().as_str(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source(Option<String>);

impl Source {
    /// A source that prints no tag.
    pub fn none() -> Self {
        Source(None)
    }

    /// The joined source text, if any.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub(crate) fn tag(&self, color: Color) -> String {
        match self.as_str() {
            Some(text) => format!("{}[{text}]{RESET} ", foreground(color)),
            None => String::new(),
        }
    }

    fn join<T: AsRef<str>>(segments: &[T]) -> Self {
        let joined = segments
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        Source(Some(joined))
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Source(None)
        } else {
            Source(Some(value.to_owned()))
        }
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Source(None)
        } else {
            Source(Some(value))
        }
    }
}

impl From<&String> for Source {
    fn from(value: &String) -> Self {
        Source::from(value.as_str())
    }
}

impl From<()> for Source {
    fn from((): ()) -> Self {
        Source(None)
    }
}

impl<T: AsRef<str>> From<Vec<T>> for Source {
    fn from(value: Vec<T>) -> Self {
        Source::join(&value)
    }
}

impl<T: AsRef<str>> From<&[T]> for Source {
    fn from(value: &[T]) -> Self {
        Source::join(value)
    }
}

impl<T: AsRef<str>, const N: usize> From<[T; N]> for Source {
    fn from(value: [T; N]) -> Self {
        Source::join(&value)
    }
}

impl<T: Into<Source>> From<Option<T>> for Source {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Source::none, Into::into)
    }
}
