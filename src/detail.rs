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

use serde_json::Value;

use crate::Payload;
use crate::color::DIM;
use crate::color::dim;
use crate::format::Line;

/// Indentation marker; the prefix grows by one marker per nesting level.
const MARKER: &str = "  |";

/// Auxiliary data printed as indented lines below a log line.
///
/// Every leaf becomes one line. A nested sequence first prints a connector line naming it, then
/// its elements one marker deeper:
///
/// ```text
/// INFO [build] finished (10:02)
///   | Number 3
///   | Array ↵
///   |  | 'warning: unused import'
///   |  | Object { file: 'lib.rs', line: 12 }
/// ```
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use shellog::Detail;
/// use shellog::Payload;
///
/// let detail = Detail::from(json!([3, ["warning", { "line": 12 }]]));
/// assert_eq!(
///     detail,
///     Detail::Sequence(vec![
///         Detail::Leaf(Payload::from(3)),
///         Detail::Sequence(vec![
///             Detail::Leaf(Payload::from("warning")),
///             Detail::Leaf(Payload::from(json!({ "line": 12 }))),
///         ]),
///     ])
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    /// A single value on its own line.
    Leaf(Payload),
    /// An ordered list of nodes, indented one level deeper than its parent.
    Sequence(Vec<Detail>),
}

impl Detail {
    /// Render the colored lines for this detail tree.
    pub(crate) fn render(&self, annotate_types: bool) -> Vec<String> {
        let mut lines = vec![];
        self.walk(MARKER, 0, annotate_types, &mut lines);
        lines
    }

    fn walk(&self, prefix: &str, depth: usize, annotate_types: bool, lines: &mut Vec<String>) {
        match self {
            Detail::Sequence(nodes) => {
                if nodes.is_empty() {
                    return;
                }
                if depth > 0 {
                    let name = Payload::Text(dim("Array"));
                    let connector = Line {
                        start: dim(prefix),
                        payload: &name,
                        footer: format!(" {}", dim("↵")),
                        annotate_type: false,
                        payload_color: None,
                    };
                    lines.push(connector.render());
                }
                // the top level sequence shares the first prefix with its elements
                let prefix = if depth == 0 {
                    prefix.to_owned()
                } else {
                    format!("{prefix}{MARKER}")
                };
                for node in nodes {
                    node.walk(&prefix, depth + 1, annotate_types, lines);
                }
            }
            Detail::Leaf(payload) => {
                let line = Line {
                    start: dim(prefix),
                    payload,
                    footer: String::new(),
                    annotate_type: annotate_types,
                    payload_color: Some(DIM.to_owned()),
                };
                lines.push(line.render());
            }
        }
    }
}

impl From<Payload> for Detail {
    fn from(value: Payload) -> Self {
        Detail::Leaf(value)
    }
}

impl From<Value> for Detail {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Detail::Sequence(items.into_iter().map(Detail::from).collect()),
            value => Detail::Leaf(Payload::from(value)),
        }
    }
}

impl<T: Into<Detail>> From<Vec<T>> for Detail {
    fn from(value: Vec<T>) -> Self {
        Detail::Sequence(value.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_from_leaf {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Detail {
                fn from(value: $t) -> Self {
                    Detail::Leaf(Payload::from(value))
                }
            }
        )*
    };
}

impl_from_leaf!(&str, String, bool, i32, i64, u32, u64, usize, f64);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::decolor;

    fn plain(detail: &Detail) -> Vec<String> {
        detail
            .render(true)
            .iter()
            .map(|line| decolor(line).into_owned())
            .collect()
    }

    #[test]
    fn test_render_nested_sequences() {
        let detail = Detail::from(json!([1, "two", [3, { "k": true }, [[]]], []]));
        assert_eq!(
            plain(&detail),
            vec![
                "  | Number 1",
                "  | two",
                "  | Array ↵",
                "  |  | Number 3",
                "  |  | Object { k: true }",
                "  |  | Array ↵",
            ]
        );
    }

    #[test]
    fn test_render_scalar_root() {
        assert_eq!(plain(&Detail::from("only")), vec!["  | only"]);
        assert_eq!(plain(&Detail::from(json!({}))), vec!["  | Object {}"]);
    }

    #[test]
    fn test_render_empty_sequence() {
        assert!(plain(&Detail::Sequence(vec![])).is_empty());
    }

    #[test]
    fn test_render_without_type_names() {
        let lines = Detail::from(vec![1, 2]).render(false);
        let lines = lines.iter().map(|l| decolor(l).into_owned()).collect::<Vec<_>>();
        assert_eq!(lines, vec!["  | 1", "  | 2"]);
    }

    #[test]
    fn test_leaf_line_colors() {
        let lines = Detail::from(7).render(true);
        assert_eq!(
            lines,
            vec!["\x1b[0m\x1b[2m  |\x1b[0m \x1b[2mNumber\x1b[0m \x1b[2m7\x1b[2m\x1b[0m"]
        );
    }
}
