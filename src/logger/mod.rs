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
use std::path::Path;
use std::path::PathBuf;

use jiff::tz::TimeZone;

use crate::Detail;
use crate::Error;
use crate::Level;
use crate::LevelColor;
use crate::Options;
use crate::Payload;
use crate::Source;
use crate::append::Append;
use crate::append::LogFile;
use crate::clock::Clock;
use crate::color::dim;
use crate::color::foreground;
use crate::decolor;
use crate::format::Line;
use crate::format::clock_footer;
use crate::trap::Trap;

mod builder;

pub use self::builder::LoggerBuilder;

/// A leveled logger printing colored lines to a console and, optionally, plain lines to a
/// log file.
///
/// Every method writes synchronously before returning. Write failures never reach the caller;
/// they are handed to the configured [`Trap`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use shellog::Logger;
///
/// let logger = Logger::builder().build().unwrap();
/// logger.info("listening on :8080", "http");
/// logger.warn("slow query", ["db", "pool"]);
/// logger.error_with("request failed", "http", json!(["timeout", { "ms": 3000 }]));
/// logger.debug("config", json!({ "workers": 4 }));
/// ```
#[derive(Debug)]
pub struct Logger {
    options: Options,
    retention_limit: usize,
    colors: LevelColor,
    timezone: TimeZone,
    clock: Clock,
    no_color: bool,
    annotate_types: bool,
    console: Box<dyn Append>,
    file: Option<LogFile>,
    trap: Box<dyn Trap>,
}

impl Logger {
    /// Create a logger from `options`, with the process working directory as parent of the
    /// default log directory.
    ///
    /// # Errors
    ///
    /// See [`LoggerBuilder::build`].
    pub fn new(options: Options) -> Result<Logger, Error> {
        LoggerBuilder::new().options(options).build()
    }

    /// Create a new [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// The options this logger was built from.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// How many existing log files the retention pass kept.
    pub fn retention_limit(&self) -> usize {
        self.retention_limit
    }

    /// The resolved log directory, if file logging is enabled.
    pub fn log_dir(&self) -> Option<&Path> {
        self.file.as_ref().map(LogFile::dir)
    }

    /// The log file of this logger, if file logging is enabled.
    pub fn log_file(&self) -> Option<&Path> {
        self.file.as_ref().map(LogFile::path)
    }

    /// The old log files deleted when this logger was built, newest first.
    pub fn removed_log_files(&self) -> &[PathBuf] {
        self.file.as_ref().map_or(&[][..], LogFile::removed)
    }

    /// Print a line at `level`, followed by the lines of `detail`.
    ///
    /// For [`Level::Debug`] the source is printed as the debug name.
    pub fn emit(
        &self,
        level: Level,
        data: impl Into<Payload>,
        source: impl Into<Source>,
        detail: Option<&Detail>,
    ) {
        let source = source.into();
        let data = data.into().decolored();

        if level == Level::Panic {
            self.write_console("");
        }

        let now = self.clock.now_in(&self.timezone);
        let line = Line {
            start: self.start(level, &source),
            payload: &data,
            footer: clock_footer(&now),
            annotate_type: self.annotate_types,
            payload_color: level.payload_color().map(foreground),
        };
        self.write(&line.render());

        if let Some(detail) = detail {
            for line in detail.render(self.annotate_types) {
                self.write(&line);
            }
        }

        if level == Level::Panic {
            self.write_console("");
        }
    }

    /// Print a green `OK` line.
    pub fn ok(&self, data: impl Into<Payload>, source: impl Into<Source>) {
        self.emit(Level::Ok, data, source, None);
    }

    /// Print a green `OK` line followed by `detail`.
    pub fn ok_with(
        &self,
        data: impl Into<Payload>,
        source: impl Into<Source>,
        detail: impl Into<Detail>,
    ) {
        self.emit(Level::Ok, data, source, Some(&detail.into()));
    }

    /// Print a blue `LOG` line.
    pub fn log(&self, data: impl Into<Payload>, source: impl Into<Source>) {
        self.emit(Level::Log, data, source, None);
    }

    /// Print a blue `LOG` line followed by `detail`.
    pub fn log_with(
        &self,
        data: impl Into<Payload>,
        source: impl Into<Source>,
        detail: impl Into<Detail>,
    ) {
        self.emit(Level::Log, data, source, Some(&detail.into()));
    }

    /// Print a cyan `INFO` line.
    pub fn info(&self, data: impl Into<Payload>, source: impl Into<Source>) {
        self.emit(Level::Info, data, source, None);
    }

    /// Print a cyan `INFO` line followed by `detail`.
    pub fn info_with(
        &self,
        data: impl Into<Payload>,
        source: impl Into<Source>,
        detail: impl Into<Detail>,
    ) {
        self.emit(Level::Info, data, source, Some(&detail.into()));
    }

    /// Print a yellow `WARN` line. The source tag is blue.
    pub fn warn(&self, data: impl Into<Payload>, source: impl Into<Source>) {
        self.emit(Level::Warn, data, source, None);
    }

    /// Print a yellow `WARN` line followed by `detail`.
    pub fn warn_with(
        &self,
        data: impl Into<Payload>,
        source: impl Into<Source>,
        detail: impl Into<Detail>,
    ) {
        self.emit(Level::Warn, data, source, Some(&detail.into()));
    }

    /// Print a red `ERROR` line.
    pub fn error(&self, data: impl Into<Payload>, source: impl Into<Source>) {
        self.emit(Level::Error, data, source, None);
    }

    /// Print a red `ERROR` line followed by `detail`.
    pub fn error_with(
        &self,
        data: impl Into<Payload>,
        source: impl Into<Source>,
        detail: impl Into<Detail>,
    ) {
        self.emit(Level::Error, data, source, Some(&detail.into()));
    }

    /// Print a red `PANIC!!` line between two blank console lines.
    ///
    /// This does not panic; it only reports a fatal condition.
    pub fn panic(&self, data: impl Into<Payload>, source: impl Into<Source>) {
        self.emit(Level::Panic, data, source, None);
    }

    /// Print a red `PANIC!!` line and `detail` between two blank console lines.
    pub fn panic_with(
        &self,
        data: impl Into<Payload>,
        source: impl Into<Source>,
        detail: impl Into<Detail>,
    ) {
        self.emit(Level::Panic, data, source, Some(&detail.into()));
    }

    /// Print a blue `DEBUG` line labelled with `name`.
    pub fn debug(&self, name: impl Into<Source>, data: impl Into<Payload>) {
        self.emit(Level::Debug, data, name, None);
    }

    /// Print a blue `DEBUG` line labelled with `name`, followed by `detail`.
    pub fn debug_with(
        &self,
        name: impl Into<Source>,
        data: impl Into<Payload>,
        detail: impl Into<Detail>,
    ) {
        self.emit(Level::Debug, data, name, Some(&detail.into()));
    }

    /// Flush the console and the log file.
    pub fn flush(&self) {
        if let Err(err) = self.console.flush() {
            self.trap.trap(&err);
        }
        if let Some(file) = &self.file {
            if let Err(err) = file.flush() {
                self.trap.trap(&err);
            }
        }
    }

    fn start(&self, level: Level, source: &Source) -> String {
        let tag = self.colors.colorize_level(level);
        match level {
            Level::Debug => match source.as_str() {
                Some(name) => format!("{tag} {} --", dim(name)),
                None => format!("{tag} --"),
            },
            _ => format!("{tag} {}", source.tag(level.source_color())),
        }
    }

    fn write(&self, line: &str) {
        self.write_console(line);
        if let Some(file) = &self.file {
            if let Err(err) = file.append(line) {
                self.trap.trap(&err);
            }
        }
    }

    fn write_console(&self, line: &str) {
        let line = if self.no_color {
            decolor(line)
        } else {
            Cow::Borrowed(line)
        };
        if let Err(err) = self.console.append(&line) {
            self.trap.trap(&err);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;
    use std::sync::Mutex;

    use jiff::Timestamp;
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;
    use crate::append::Capture;
    use crate::clock::ManualClock;

    fn capture_logger() -> (Logger, Capture) {
        let capture = Capture::default();
        let now = Timestamp::from_str("2024-08-10T10:02:30Z").unwrap();
        let logger = Logger::builder()
            .console(capture.clone())
            .timezone(TimeZone::UTC)
            .clock(Clock::ManualClock(ManualClock::new(now)))
            .build()
            .unwrap();
        (logger, capture)
    }

    fn plain(capture: &Capture) -> String {
        capture
            .take()
            .iter()
            .map(|line| decolor(line).into_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_session_output() {
        let (logger, capture) = capture_logger();

        logger.ok("ready", "boot");
        logger.log("tick", ());
        logger.warn("disk almost full", ["fs", "sda1"]);
        logger.info_with(
            "build finished",
            "build",
            json!([3, ["unused import", { "file": "lib.rs", "line": 12 }]]),
        );
        logger.error(json!({ "code": 7 }), "io");
        logger.debug("init", json!({ "a": 1 }));

        insta::assert_snapshot!(plain(&capture), @r"
        OK [boot] ready (10:02)
        LOG tick (10:02)
        WARN [fs sda1] disk almost full (10:02)
        INFO [build] build finished (10:02)
          | Number 3
          | Array ↵
          |  | unused import
          |  | Object { file: 'lib.rs', line: 12 }
        ERROR [io] Object { code: 7 } (10:02)
        DEBUG init -- Object { a: 1 } (10:02)
        ");
    }

    #[test]
    fn test_level_colors() {
        let (logger, capture) = capture_logger();

        logger.ok("a", "s");
        logger.warn("b", "s");
        let lines = capture.take();
        assert_eq!(
            lines[0],
            "\x1b[0m\x1b[32mOK\x1b[0m \x1b[33m[s]\x1b[0m a\x1b[0m \x1b[2m(10:02)\x1b[0m\x1b[0m"
        );
        assert_eq!(
            lines[1],
            "\x1b[0m\x1b[33mWARN\x1b[0m \x1b[34m[s]\x1b[0m b\x1b[0m \x1b[2m(10:02)\x1b[0m\x1b[0m"
        );
    }

    #[test]
    fn test_panic_is_framed_by_blank_lines() {
        let (logger, capture) = capture_logger();

        logger.panic_with("fail", "SRC", vec!["cause"]);
        let lines = capture.take();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "");
        assert_eq!(
            lines[1],
            "\x1b[0m\x1b[31mPANIC!!\x1b[0m \x1b[31m[SRC]\x1b[0m \x1b[31mfail\x1b[31m\x1b[0m \x1b[2m(10:02)\x1b[0m\x1b[0m"
        );
        assert_eq!(decolor(&lines[2]), "  | cause");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_text_payload_is_decolored() {
        let (logger, capture) = capture_logger();

        logger.info("\x1b[35mpurple\x1b[0m", ());
        let lines = capture.take();
        assert!(lines[0].contains(" purple\x1b[0m"));
        assert!(!lines[0].contains("\x1b[35m"));
    }

    #[test]
    fn test_debug_without_name() {
        let (logger, capture) = capture_logger();

        logger.debug((), 5);
        assert_eq!(plain(&capture), "DEBUG -- Number 5 (10:02)");
    }

    #[test]
    fn test_no_color_and_no_annotation() {
        let capture = Capture::default();
        let logger = Logger::builder()
            .console(capture.clone())
            .no_color()
            .annotate_types(false)
            .build()
            .unwrap();

        logger.info_with(json!([1, 2]), "s", json!([true]));
        let lines = capture.take();
        assert!(lines.iter().all(|line| !line.contains('\x1b')));
        assert!(lines[0].starts_with("INFO [s] [ 1, 2 ] ("));
        assert_eq!(lines[1], "  | true");
    }

    #[derive(Debug)]
    struct Broken;

    impl Append for Broken {
        fn append(&self, _: &str) -> Result<(), Error> {
            Err(Error::from_io_error(std::io::Error::other("closed")))
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Collect(Arc<Mutex<Vec<ErrorKind>>>);

    impl Trap for Collect {
        fn trap(&self, err: &Error) {
            self.0.lock().unwrap().push(err.kind());
        }
    }

    #[test]
    fn test_write_errors_go_to_trap() {
        let trap = Collect::default();
        let logger = Logger::builder()
            .console(Broken)
            .trap(trap.clone())
            .build()
            .unwrap();

        logger.ok("one", ());
        logger.panic("two", ());
        assert_eq!(trap.0.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_without_file_logging() {
        let (logger, _) = capture_logger();
        assert_eq!(logger.retention_limit(), 3);
        assert!(logger.log_dir().is_none());
        assert!(logger.log_file().is_none());
        assert!(logger.removed_log_files().is_empty());
    }

    #[test]
    fn test_emit_matches_level_methods() {
        let (logger, capture) = capture_logger();

        logger.emit(Level::Info, "ready", "boot", None);
        logger.emit(Level::Debug, 5, "count", Some(&Detail::from("more")));
        logger.info("ready", "boot");
        assert_eq!(
            plain(&capture),
            "INFO [boot] ready (10:02)\n\
             DEBUG count -- Number 5 (10:02)\n  | more\n\
             INFO [boot] ready (10:02)"
        );
    }
}
