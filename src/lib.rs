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

//! Shellog is a leveled console logger for command line programs, printing colored lines with a
//! short clock footer and optionally mirroring them, without colors, to a log file.
//!
//! # Overview
//!
//! A [`Logger`] prints one line per call at one of seven levels: `OK`, `LOG`, `INFO`, `WARN`,
//! `ERROR`, `PANIC!!` and `DEBUG`. Each line may carry a source tag and be followed by a tree of
//! [`Detail`] lines. When file logging is enabled, every logger opens a fresh file in the log
//! directory, and the oldest files beyond the configured maximum are deleted first.
//!
//! # Examples
//!
//! Console only:
//!
//! ```
//! use shellog::Logger;
//!
//! let logger = Logger::builder().build().unwrap();
//! logger.ok("connected", "db");
//! logger.warn("retrying", ["http", "client"]);
//! ```
//!
//! Mirrored to a log file under `./ShellLogs`, keeping at most five files:
//!
//! ```no_run
//! use serde_json::json;
//! use shellog::Logger;
//!
//! let logger = Logger::builder()
//!     .log_to_file(true)
//!     .max_log_files(5)
//!     .build()
//!     .unwrap();
//! logger.info_with("build finished", "ci", json!([3, ["unused import"]]));
//! ```
//!
//! Forward records of the `log` crate:
//!
//! ```
//! shellog::Logger::builder().build().unwrap().apply();
//!
//! log::info!("This is an info message.");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod trap;

mod bridge;
mod clock;
mod color;
mod detail;
mod error;
mod format;
mod level;
mod logger;
mod options;
mod payload;
mod source;

pub use self::append::Append;
pub use self::color::LevelColor;
pub use self::color::decolor;
pub use self::detail::Detail;
pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::level::Level;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;
pub use self::options::DEFAULT_LOG_DIR_NAME;
pub use self::options::DEFAULT_MAX_LOG_FILES;
pub use self::options::Options;
pub use self::payload::Payload;
pub use self::source::Source;
pub use self::trap::Trap;

pub extern crate colored;
pub extern crate jiff;
pub extern crate serde_json;
