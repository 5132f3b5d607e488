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

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::payload::inspect;

/// The configured maximum of log files when `maxLogsFiles` is not set.
pub const DEFAULT_MAX_LOG_FILES: i64 = 4;

/// Name of the directory created under the working directory when no `logDir` is set.
pub const DEFAULT_LOG_DIR_NAME: &str = "ShellLogs";

/// Options of a [`Logger`](crate::Logger).
///
/// Field names serialize in camelCase so that a configuration file reads:
///
/// ```json
/// { "maxLogsFiles": 5, "log": true, "logDir": "./logs" }
/// ```
///
/// Unset fields are skipped when serializing, and that serialized form is what the log file
/// header records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Maximum number of log files kept in the log directory, the new one included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_logs_files: Option<i64>,
    /// Whether lines are mirrored to a log file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,
    /// The directory holding log files. It must already exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Options {
    /// How many existing log files the retention pass keeps.
    ///
    /// This is the configured maximum minus one, since the file opened by the new logger is
    /// not listed yet. A maximum for which `max - 1 > 0` does not hold is rejected, so the
    /// smallest accepted value is 2.
    ///
    /// Without `maxLogsFiles` the maximum is [`DEFAULT_MAX_LOG_FILES`].
    ///
    /// # Errors
    ///
    /// Return a config error if `maxLogsFiles` is lower than 2.
    ///
    /// # Examples
    ///
    /// ```
    /// use shellog::Options;
    ///
    /// assert_eq!(Options::default().retention_limit().unwrap(), 3);
    ///
    /// let options = Options {
    ///     max_logs_files: Some(1),
    ///     ..Options::default()
    /// };
    /// assert!(options.retention_limit().is_err());
    /// ```
    pub fn retention_limit(&self) -> Result<usize, Error> {
        let max = self.max_logs_files.unwrap_or(DEFAULT_MAX_LOG_FILES);
        // TODO: accept 1, meaning only the new file is kept.
        if max <= 1 {
            return Err(Error::config(
                "the maximum of log files leaves no room for any log file",
            )
            .with_context("maxLogsFiles", max));
        }
        usize::try_from(max - 1).map_err(|err| {
            Error::config("the maximum of log files is out of range")
                .with_context("maxLogsFiles", max)
                .with_source(err)
        })
    }

    /// Whether file logging is enabled.
    pub fn file_logging(&self) -> bool {
        self.log.unwrap_or(false)
    }

    /// Render the options on one line, as written in the log file header.
    pub fn dump(&self) -> String {
        match serde_json::to_value(self) {
            Ok(value) => inspect(&value),
            Err(_) => format!("{self:?}"),
        }
    }
}
