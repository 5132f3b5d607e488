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

//! Appender for mirroring log lines to a file.
//!
//! Every logger with file logging enabled owns one file, named after the local time it was
//! created at (for example `logs_10_15_2026_3_04_05_PM`). Before the file is created, the log
//! directory is trimmed to the newest files by modification time.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use shellog::append::Append;
//! use shellog::append::LogFile;
//!
//! let file = LogFile::builder("/var/run/app")
//!     .log_dir("/var/log/app")
//!     .retention_limit(3)
//!     .build()
//!     .unwrap();
//! file.write_header(Path::new("/var/run/app"), "{}").unwrap();
//! file.append("\x1b[32mOK\x1b[0m stored without colors").unwrap();
//! ```

pub use retention::enforce_retention;
pub use writer::LogFile;
pub use writer::LogFileBuilder;
pub use writer::file_name;

mod retention;
mod writer;
