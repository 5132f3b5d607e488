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

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::sync::Mutex;
use std::sync::MutexGuard;

use jiff::Timestamp;
use jiff::Zoned;
use jiff::tz::TimeZone;
use regex::Regex;

use crate::Error;
use crate::append::Append;
use crate::append::file::enforce_retention;
use crate::clock::Clock;
use crate::decolor;
use crate::options::DEFAULT_LOG_DIR_NAME;

const FILE_NAME_PREFIX: &str = "logs_";

static FILE_NAME_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: the pattern is a valid literal
    Regex::new(r"\s+|,\s*|:|/").unwrap()
});

/// The name of a log file created at `now`.
///
/// The local time is written as `10/15/2026, 3:04:05 PM`, then whitespace, commas, colons and
/// slashes become underscores.
///
/// # Examples
///
/// ```
/// use jiff::Zoned;
///
/// let now: Zoned = "2026-10-15T15:04:05[UTC]".parse().unwrap();
/// assert_eq!(shellog::append::file::file_name(&now), "logs_10_15_2026_3_04_05_PM");
/// ```
pub fn file_name(now: &Zoned) -> String {
    let stamp = now.strftime("%-m/%-d/%Y, %-I:%M:%S %p").to_string();
    format!(
        "{FILE_NAME_PREFIX}{}",
        FILE_NAME_SEPARATORS.replace_all(&stamp, "_")
    )
}

/// A builder for configuring [`LogFile`].
#[derive(Debug)]
pub struct LogFileBuilder {
    working_dir: PathBuf,
    log_dir: Option<PathBuf>,
    retention_limit: usize,
    timezone: TimeZone,
    clock: Clock,
}

impl LogFileBuilder {
    /// Create a new builder.
    ///
    /// `working_dir` holds the default `ShellLogs` directory, and relative log directories are
    /// resolved against it.
    #[must_use]
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            log_dir: None,
            retention_limit: 3,
            timezone: TimeZone::system(),
            clock: Clock::DefaultClock,
        }
    }

    /// Use an existing directory instead of `<working_dir>/ShellLogs`.
    #[must_use]
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Sets how many existing files survive the retention pass.
    #[must_use]
    pub fn retention_limit(mut self, n: usize) -> Self {
        self.retention_limit = n;
        self
    }

    /// Sets the time zone the file name is written in.
    ///
    /// Defaults to the system time zone.
    #[must_use]
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    #[must_use]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Resolve the log directory, run the retention pass and open the new log file.
    ///
    /// # Errors
    ///
    /// Return an error if either:
    ///
    /// * The configured log directory does not exist or is not a directory.
    /// * The default log directory cannot be created.
    /// * The retention pass fails.
    /// * The log file cannot be opened.
    pub fn build(self) -> Result<LogFile, Error> {
        let dir = self.resolve_dir()?;
        let removed = enforce_retention(&dir, self.retention_limit)?;

        let now = self.clock.now_in(&self.timezone);
        let path = dir.join(file_name(&now));
        let writer = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|err| {
                Error::config("failed to create log file")
                    .with_context("path", path.display())
                    .with_source(err)
            })?;

        Ok(LogFile {
            dir,
            path,
            removed,
            started: now.timestamp(),
            writer: Mutex::new(writer),
        })
    }

    fn resolve_dir(&self) -> Result<PathBuf, Error> {
        match &self.log_dir {
            Some(dir) => {
                let candidate = self.working_dir.join(dir);
                let invalid = || {
                    Error::config("invalid log directory, please provide an existing folder")
                        .with_context("dir", candidate.display())
                };
                let resolved =
                    fs::canonicalize(&candidate).map_err(|err| invalid().with_source(err))?;
                if !resolved.is_dir() {
                    return Err(invalid());
                }
                Ok(resolved)
            }
            None => {
                let default = self.working_dir.join(DEFAULT_LOG_DIR_NAME);
                let dir = std::path::absolute(&default).map_err(|err| {
                    Error::config("failed to resolve default log directory")
                        .with_context("dir", default.display())
                        .with_source(err)
                })?;
                if !dir.is_dir() {
                    fs::create_dir(&dir).map_err(|err| {
                        Error::config("failed to create default log directory")
                            .with_context("dir", dir.display())
                            .with_source(err)
                    })?;
                }
                Ok(dir)
            }
        }
    }
}

/// An appender that writes decolored lines to the log file of one logger.
#[derive(Debug)]
pub struct LogFile {
    dir: PathBuf,
    path: PathBuf,
    removed: Vec<PathBuf>,
    started: Timestamp,
    writer: Mutex<File>,
}

impl LogFile {
    /// Create a new [`LogFileBuilder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use shellog::append::LogFile;
    ///
    /// let builder = LogFile::builder(".");
    /// ```
    #[must_use]
    pub fn builder(working_dir: impl Into<PathBuf>) -> LogFileBuilder {
        LogFileBuilder::new(working_dir)
    }

    /// The resolved directory holding the file.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The full path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The old log files deleted by the retention pass before this file was created, newest
    /// first.
    pub fn removed(&self) -> &[PathBuf] {
        &self.removed
    }

    /// Write the header block that starts every log file.
    ///
    /// ```text
    /// [HEADER]
    /// CWD = /home/me/app
    /// THIS_DIR = /home/me/app/ShellLogs/logs_10_15_2026_3_04_05_PM
    /// START_TIMESTAMP = 1792069445000
    /// START_UTC = Thu, 15 Oct 2026 13:04:05 GMT
    /// OPTIONS = { log: true }
    ///
    /// [BODY]
    ///
    /// ```
    pub fn write_header(&self, working_dir: &Path, options: &str) -> Result<(), Error> {
        let header = format!(
            "[HEADER]\nCWD = {}\nTHIS_DIR = {}\nSTART_TIMESTAMP = {}\nSTART_UTC = {}\nOPTIONS = {}\n\n[BODY]\n\n",
            working_dir.display(),
            self.path.display(),
            self.started.as_millisecond(),
            self.started.strftime("%a, %d %b %Y %H:%M:%S GMT"),
            options,
        );
        self.writer()
            .write_all(header.as_bytes())
            .map_err(Error::from_io_error)
    }

    fn writer(&self) -> MutexGuard<'_, File> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Append for LogFile {
    fn append(&self, line: &str) -> Result<(), Error> {
        let line = decolor(line);
        let mut bytes = line.trim().as_bytes().to_vec();
        bytes.push(b'\n');
        let mut writer = self.writer();
        writer.write_all(&bytes).map_err(Error::from_io_error)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        let mut writer = self.writer();
        writer.flush().map_err(Error::from_io_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::str::FromStr;
    use std::time::Duration;
    use std::time::SystemTime;

    use tempfile::TempDir;

    use super::*;
    use crate::ErrorKind;
    use crate::clock::ManualClock;

    fn manual_clock(now: &str) -> Clock {
        Clock::ManualClock(ManualClock::new(Timestamp::from_str(now).unwrap()))
    }

    #[test]
    fn test_file_names() {
        let now = Zoned::from_str("2024-01-05T00:07:09[UTC]").unwrap();
        assert_eq!(file_name(&now), "logs_1_5_2024_12_07_09_AM");

        let now = Zoned::from_str("2024-12-25T23:59:59[UTC]").unwrap();
        assert_eq!(file_name(&now), "logs_12_25_2024_11_59_59_PM");
    }

    #[test]
    fn test_creates_default_directory() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let file = LogFile::builder(temp_dir.path())
            .timezone(TimeZone::UTC)
            .clock(manual_clock("2026-10-15T13:04:05Z"))
            .build()
            .unwrap();

        assert!(file.dir().ends_with("ShellLogs"));
        assert!(file.removed().is_empty());
        assert_eq!(
            file.path(),
            file.dir().join("logs_10_15_2026_1_04_05_PM").as_path()
        );
        assert!(file.path().is_file());
    }

    #[test]
    fn test_header_and_lines() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let file = LogFile::builder(temp_dir.path())
            .log_dir(".")
            .timezone(TimeZone::UTC)
            .clock(manual_clock("2026-10-15T13:04:05Z"))
            .build()
            .unwrap();

        file.write_header(Path::new("/work"), "{ log: true }").unwrap();
        file.append("\x1b[0m\x1b[32mOK\x1b[0m ready \x1b[0m \x1b[2m(13:04)\x1b[0m")
            .unwrap();
        file.append("\x1b[0m\x1b[2m  |\x1b[0m nested\x1b[0m").unwrap();
        file.flush().unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let expected = format!(
            "[HEADER]\nCWD = /work\nTHIS_DIR = {}\nSTART_TIMESTAMP = 1792069445000\n\
             START_UTC = Thu, 15 Oct 2026 13:04:05 GMT\nOPTIONS = {{ log: true }}\n\n[BODY]\n\n\
             OK ready  (13:04)\n| nested\n",
            file.path().display()
        );
        assert_eq!(content, expected);
    }

    #[test]
    fn test_reports_removed_files() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        for (name, age) in [("old", 120), ("older", 240), ("oldest", 360)] {
            let file = File::create(temp_dir.path().join(name)).unwrap();
            file.set_modified(SystemTime::now() - Duration::from_secs(age))
                .unwrap();
        }

        let file = LogFile::builder(temp_dir.path())
            .log_dir(".")
            .retention_limit(1)
            .build()
            .unwrap();
        let removed = file
            .removed()
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        assert_eq!(removed, vec!["older", "oldest"]);
        assert!(temp_dir.path().join("old").is_file());
    }

    #[test]
    fn test_invalid_directories() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");

        let err = LogFile::builder(temp_dir.path())
            .log_dir("missing")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        fs::write(temp_dir.path().join("plain"), "not a directory").unwrap();
        let err = LogFile::builder(temp_dir.path())
            .log_dir("plain")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        // the default directory name is taken by a file
        fs::write(temp_dir.path().join(DEFAULT_LOG_DIR_NAME), "").unwrap();
        let err = LogFile::builder(temp_dir.path()).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
