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

use jiff::Zoned;

use crate::Payload;
use crate::color::RESET;
use crate::color::dim;

/// One colored output line: `start [type] payload footer`.
#[derive(Debug)]
pub(crate) struct Line<'a> {
    pub(crate) start: String,
    pub(crate) payload: &'a Payload,
    pub(crate) footer: String,
    pub(crate) annotate_type: bool,
    /// Escape written on both sides of the payload.
    pub(crate) payload_color: Option<String>,
}

impl Line<'_> {
    pub(crate) fn render(&self) -> String {
        let mut out = String::from(RESET);
        out.push_str(&self.start);
        if !self.start.ends_with(char::is_whitespace) {
            out.push(' ');
        }
        if self.annotate_type {
            if let Some(name) = self.payload.type_name() {
                out.push_str(&dim(name));
                out.push(' ');
            }
        }
        let color = self.payload_color.as_deref().unwrap_or_default();
        out.push_str(color);
        out.push_str(&self.payload.render());
        out.push_str(color);
        out.push_str(&self.footer);
        out.push_str(RESET);
        out
    }
}

/// The `(HH:MM)` footer appended to every level line.
pub(crate) fn clock_footer(now: &Zoned) -> String {
    format!("{RESET} {}", dim(&now.strftime("(%H:%M)").to_string()))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;
    use crate::decolor;

    #[test]
    fn test_render_separates_start_and_payload() {
        let payload = Payload::from("ready");
        let line = Line {
            start: "START".to_owned(),
            payload: &payload,
            footer: String::new(),
            annotate_type: true,
            payload_color: None,
        };
        assert_eq!(line.render(), "\x1b[0mSTART ready\x1b[0m");

        let line = Line {
            start: "START ".to_owned(),
            ..line
        };
        assert_eq!(line.render(), "\x1b[0mSTART ready\x1b[0m");
    }

    #[test]
    fn test_render_type_annotation() {
        let payload = Payload::from(json!({ "a": 1 }));
        let mut line = Line {
            start: "S".to_owned(),
            payload: &payload,
            footer: String::new(),
            annotate_type: true,
            payload_color: Some("\x1b[31m".to_owned()),
        };
        assert_eq!(
            line.render(),
            "\x1b[0mS \x1b[2mObject\x1b[0m \x1b[31m{ a: 1 }\x1b[31m\x1b[0m"
        );

        line.annotate_type = false;
        assert_eq!(decolor(&line.render()), "S { a: 1 }");
    }

    #[test]
    fn test_clock_footer() {
        let now = Zoned::from_str("2024-08-10T07:05:59[UTC]").unwrap();
        assert_eq!(clock_footer(&now), "\x1b[0m \x1b[2m(07:05)\x1b[0m");
    }
}
