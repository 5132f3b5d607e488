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

use std::borrow::Cow;
use std::fmt::Write;

use serde::Serialize;
use serde_json::Value;

use crate::Error;
use crate::ErrorKind;
use crate::decolor;

/// The data of a log line.
///
/// Text is printed verbatim. Structured values are printed on one line, prefixed by their type
/// name, with object keys in insertion order:
///
/// ```text
/// INFO [db] Object { host: 'localhost', ports: [ 5432, 5433 ] } (09:41)
/// ```
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use shellog::Payload;
///
/// #[derive(Serialize)]
/// struct Pool {
///     size: u32,
/// }
///
/// let payload = Payload::named("Pool", &Pool { size: 4 }).unwrap();
/// assert_eq!(payload.type_name(), Some("Pool"));
/// assert_eq!(payload.render(), "{ size: 4 }");
///
/// let payload = Payload::from(serde_json::json!([1, "two"]));
/// assert_eq!(payload.type_name(), Some("Array"));
/// assert_eq!(payload.render(), "[ 1, 'two' ]");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Plain text.
    Text(String),
    /// A structured value, named after its JSON kind.
    Value(Value),
    /// A structured value with an explicit type name.
    Named {
        /// The name printed before the value.
        type_name: String,
        /// The value.
        value: Value,
    },
}

impl Payload {
    /// Convert any serializable value into a payload.
    ///
    /// A value that serializes to a string becomes [`Payload::Text`].
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<Payload, Error> {
        let value = to_value(value)?;
        Ok(Payload::from(value))
    }

    /// Convert any serializable value into a payload printed under `type_name`.
    pub fn named<T: Serialize + ?Sized>(
        type_name: impl Into<String>,
        value: &T,
    ) -> Result<Payload, Error> {
        let value = to_value(value)?;
        Ok(Payload::Named {
            type_name: type_name.into(),
            value,
        })
    }

    /// The type name printed before a structured value. Text and `null` have none.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Payload::Text(_) => None,
            Payload::Value(value) => kind_name(value),
            Payload::Named { type_name, .. } => Some(type_name),
        }
    }

    /// Render the payload without its type name.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Payload::Text(text) => Cow::Borrowed(text),
            Payload::Value(value) | Payload::Named { value, .. } => Cow::Owned(inspect(value)),
        }
    }

    pub(crate) fn decolored(self) -> Payload {
        match self {
            Payload::Text(text) => Payload::Text(decolor(&text).into_owned()),
            other => other,
        }
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, Error> {
    serde_json::to_value(value)
        .map_err(|err| Error::new(ErrorKind::Payload, "failed to serialize payload").with_source(err))
}

fn kind_name(value: &Value) -> Option<&'static str> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some("Boolean"),
        Value::Number(_) => Some("Number"),
        Value::String(_) => Some("String"),
        Value::Array(_) => Some("Array"),
        Value::Object(_) => Some("Object"),
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Payload::Text(text),
            value => Payload::Value(value),
        }
    }
}

impl From<&Value> for Payload {
    fn from(value: &Value) -> Self {
        Payload::from(value.clone())
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_owned())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<&String> for Payload {
    fn from(value: &String) -> Self {
        Payload::Text(value.clone())
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Payload {
                fn from(value: $t) -> Self {
                    Payload::Value(Value::from(value))
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Render a value on one line, in the style of a REPL inspector.
pub(crate) fn inspect(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => {
            // SAFETY: write to a string always succeeds
            write!(out, "{b}").unwrap();
        }
        Value::Number(n) => {
            // SAFETY: write to a string always succeeds
            write!(out, "{n}").unwrap();
        }
        Value::String(s) => write_quoted(out, s),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[ ");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push_str(" ]");
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{ ");
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if is_identifier(key) {
                    out.push_str(key);
                } else {
                    write_quoted(out, key);
                }
                out.push_str(": ");
                write_value(out, item);
            }
            out.push_str(" }");
        }
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
