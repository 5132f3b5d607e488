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

//! Targets that formatted lines are written to.

use std::fmt;

use crate::Error;

mod capture;
pub mod file;
mod stdio;

pub use self::capture::Capture;
pub use self::file::LogFile;
pub use self::stdio::Stderr;
pub use self::stdio::Stdout;

/// An appender receives complete lines, without the trailing newline.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Write one line to the append target.
    fn append(&self, line: &str) -> Result<(), Error>;

    /// Flush any buffered lines.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Append> From<T> for Box<dyn Append> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
