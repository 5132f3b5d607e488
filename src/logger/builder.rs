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

use std::env;
use std::path::PathBuf;

use jiff::tz::TimeZone;

use crate::Error;
use crate::LevelColor;
use crate::Logger;
use crate::Options;
use crate::append::Append;
use crate::append::LogFile;
use crate::append::Stdout;
use crate::clock::Clock;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// A builder for configuring a [`Logger`].
///
/// # Examples
///
/// ```no_run
/// use shellog::Logger;
///
/// let logger = Logger::builder()
///     .log_to_file(true)
///     .log_dir("/var/log/my_app")
///     .max_log_files(10)
///     .build()
///     .unwrap();
/// logger.ok("started", "main");
/// ```
#[must_use = "call `build` to construct a logger instance"]
#[derive(Debug)]
pub struct LoggerBuilder {
    options: Options,
    working_dir: Option<PathBuf>,
    console: Box<dyn Append>,
    trap: Box<dyn Trap>,
    colors: LevelColor,
    timezone: TimeZone,
    clock: Clock,
    no_color: bool,
    annotate_types: bool,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Create a builder with default options: console only, colored, on stdout.
    pub fn new() -> Self {
        Self {
            options: Options::default(),
            working_dir: None,
            console: Box::new(Stdout::default()),
            trap: Box::new(DefaultTrap::default()),
            colors: LevelColor::default(),
            timezone: TimeZone::system(),
            clock: Clock::DefaultClock,
            no_color: false,
            annotate_types: true,
        }
    }

    /// Replace all options at once.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the maximum number of log files, the new one included.
    ///
    /// Values lower than 2 make [`build`](Self::build) fail.
    pub fn max_log_files(mut self, n: i64) -> Self {
        self.options.max_logs_files = Some(n);
        self
    }

    /// Enable or disable mirroring lines to a log file.
    pub fn log_to_file(mut self, enabled: bool) -> Self {
        self.options.log = Some(enabled);
        self
    }

    /// Set an existing directory for log files.
    ///
    /// Default to `ShellLogs` under the working directory, created when missing.
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.log_dir = Some(dir.into());
        self
    }

    /// Set the working directory recorded in the file header.
    ///
    /// It holds the default log directory, and a relative log directory is resolved against it.
    /// Default to the process working directory at the time [`build`](Self::build) runs.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Set the console appender. Default to [`Stdout`].
    pub fn console(mut self, console: impl Into<Box<dyn Append>>) -> Self {
        self.console = console.into();
        self
    }

    /// Set the trap receiving write errors. Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Customize the color of each level tag.
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Set the time zone of the `(HH:MM)` footer and of the file name.
    ///
    /// Defaults to the system time zone if not set.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use shellog::Logger;
    ///
    /// let builder = Logger::builder().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    /// Disable colored console output. The log file is never colored.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Print the type name before structured payloads. Default to `true`.
    pub fn annotate_types(mut self, enabled: bool) -> Self {
        self.annotate_types = enabled;
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the [`Logger`].
    ///
    /// When file logging is enabled, this resolves the log directory, deletes the oldest files
    /// beyond the retention limit, opens the new log file and writes its header. Nothing on disk
    /// is touched otherwise.
    ///
    /// # Errors
    ///
    /// Return an error if either:
    ///
    /// * The maximum of log files is lower than 2.
    /// * The working directory cannot be read.
    /// * The log directory is invalid or cannot be created.
    /// * An old log file cannot be deleted.
    /// * The log file cannot be opened.
    pub fn build(self) -> Result<Logger, Error> {
        let LoggerBuilder {
            options,
            working_dir,
            console,
            trap,
            colors,
            timezone,
            clock,
            no_color,
            annotate_types,
        } = self;

        let retention_limit = options.retention_limit()?;

        let file = if options.file_logging() {
            let working_dir = match working_dir {
                Some(dir) => dir,
                None => env::current_dir().map_err(|err| {
                    Error::config("failed to read the working directory").with_source(err)
                })?,
            };

            let mut builder = LogFile::builder(&working_dir)
                .retention_limit(retention_limit)
                .timezone(timezone.clone())
                .clock(clock.clone());
            if let Some(dir) = &options.log_dir {
                builder = builder.log_dir(dir);
            }
            let file = builder.build()?;

            if let Err(err) = file.write_header(&working_dir, &options.dump()) {
                trap.trap(&err);
            }
            Some(file)
        } else {
            None
        };

        Ok(Logger {
            options,
            retention_limit,
            colors,
            timezone,
            clock,
            no_color,
            annotate_types,
            console,
            file,
            trap,
        })
    }
}
