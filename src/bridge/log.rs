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

use crate::Error;
use crate::Level;
use crate::Logger;

impl Logger {
    /// Install this logger as the global logger of the `log` crate.
    ///
    /// Records are mapped by level: `error`, `warn` and `info` keep their names, `debug` prints
    /// a `DEBUG` line named after the target, and `trace` prints a `LOG` line. The target becomes
    /// the source tag.
    ///
    /// This function will set the global maximum log level to `Trace`. To override this, call
    /// [`log::set_max_level`] after this function.
    ///
    /// # Errors
    ///
    /// Return an error if the log crate global logger has already been set.
    ///
    /// # Examples
    ///
    /// ```
    /// use shellog::Logger;
    ///
    /// Logger::builder().build().unwrap().try_apply().unwrap();
    /// log::info!("ready");
    /// ```
    pub fn try_apply(self) -> Result<(), Error> {
        log::set_boxed_logger(Box::new(self)).map_err(|err| {
            Error::config("failed to install the log crate global logger").with_source(err)
        })?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }

    /// Install this logger as the global logger of the `log` crate.
    ///
    /// # Panics
    ///
    /// Panic if the log crate global logger has already been set.
    pub fn apply(self) {
        self.try_apply()
            .expect("Logger::apply must be called before the log crate global logger initialized")
    }
}

fn level_of(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug => Level::Debug,
        log::Level::Trace => Level::Log,
    }
}

impl log::Log for Logger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let data = record.args().to_string();
        self.emit(level_of(record.level()), data, record.target(), None);
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_of(log::Level::Error), Level::Error);
        assert_eq!(level_of(log::Level::Warn), Level::Warn);
        assert_eq!(level_of(log::Level::Info), Level::Info);
        assert_eq!(level_of(log::Level::Debug), Level::Debug);
        assert_eq!(level_of(log::Level::Trace), Level::Log);
    }
}
