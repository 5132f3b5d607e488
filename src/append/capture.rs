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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::append::Append;

/// An appender that keeps lines in memory, so that tests and embedding applications can read
/// back what a logger printed.
///
/// Clones share the same buffer.
///
/// # Examples
///
/// ```
/// use shellog::Logger;
/// use shellog::append::Capture;
///
/// let capture = Capture::default();
/// let logger = Logger::builder().console(capture.clone()).build().unwrap();
/// logger.ok("done", "setup");
///
/// let lines = capture.take();
/// assert_eq!(lines.len(), 1);
/// assert!(shellog::decolor(&lines[0]).starts_with("OK [setup] done"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Capture {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Capture {
    /// A copy of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.buffer().clone()
    }

    /// Remove and return the captured lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.buffer())
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Append for Capture {
    fn append(&self, line: &str) -> Result<(), Error> {
        self.buffer().push(line.to_owned());
        Ok(())
    }
}
