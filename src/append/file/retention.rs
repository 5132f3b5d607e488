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
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::Error;
use crate::ErrorKind;

#[derive(Debug)]
struct Entry {
    path: PathBuf,
    modified: SystemTime,
}

/// Keep the `limit` most recently modified entries of `dir` and delete the others.
///
/// Every entry is considered, whatever its name. Nothing is deleted while the directory holds
/// fewer than `limit` entries. Return the deleted paths, newest first.
///
/// # Errors
///
/// Return an error if the directory cannot be listed, an entry cannot be inspected, or an entry
/// cannot be deleted. The first failed deletion stops the pass.
pub fn enforce_retention(dir: &Path, limit: usize) -> Result<Vec<PathBuf>, Error> {
    let read_dir = fs::read_dir(dir).map_err(|err| {
        Error::new(ErrorKind::Retention, "failed to read log dir")
            .with_context("dir", dir.display())
            .with_source(err)
    })?;

    let mut entries = vec![];
    for entry in read_dir {
        let entry = entry.map_err(|err| {
            Error::new(ErrorKind::Retention, "failed to read log dir entry")
                .with_context("dir", dir.display())
                .with_source(err)
        })?;
        let path = entry.path();
        let modified = fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .map_err(|err| {
                Error::new(ErrorKind::Retention, "failed to read log file metadata")
                    .with_context("path", path.display())
                    .with_source(err)
            })?;
        entries.push(Entry { path, modified });
    }

    if entries.len() < limit {
        return Ok(vec![]);
    }

    // newest first
    entries.sort_by(|a, b| b.modified.cmp(&a.modified));

    let mut removed = vec![];
    for entry in entries.into_iter().skip(limit) {
        fs::remove_file(&entry.path).map_err(|err| {
            Error::new(ErrorKind::Retention, "failed to remove old log file")
                .with_context("path", entry.path.display())
                .with_source(err)
        })?;
        removed.push(entry.path);
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::fs::File;
    use std::path::Path;
    use std::time::Duration;
    use std::time::SystemTime;

    use rand::seq::SliceRandom;
    use tempfile::TempDir;

    use super::*;

    // `age` in minutes before now
    fn create_file(dir: &Path, name: &str, age: u64) {
        let file = File::create(dir.join(name)).unwrap();
        let modified = SystemTime::now() - Duration::from_secs(age * 60);
        file.set_modified(modified).unwrap();
    }

    fn names(dir: &Path) -> Vec<String> {
        let mut names = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    #[test]
    fn test_keeps_newest_files() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");

        // create in random order so that listing order says nothing about age
        let mut ages = (1..=6).collect::<Vec<u64>>();
        ages.shuffle(&mut rand::rng());
        for age in ages {
            create_file(temp_dir.path(), &format!("log_{age}"), age);
        }

        let removed = enforce_retention(temp_dir.path(), 4).unwrap();
        assert_eq!(
            removed,
            vec![temp_dir.path().join("log_5"), temp_dir.path().join("log_6")]
        );
        assert_eq!(
            names(temp_dir.path()),
            vec!["log_1", "log_2", "log_3", "log_4"]
        );
    }

    #[test]
    fn test_below_limit_keeps_everything() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        for age in 1..=3 {
            create_file(temp_dir.path(), &format!("log_{age}"), age);
        }

        assert!(enforce_retention(temp_dir.path(), 4).unwrap().is_empty());
        assert!(enforce_retention(temp_dir.path(), 3).unwrap().is_empty());
        assert_eq!(names(temp_dir.path()).len(), 3);
    }

    #[test]
    fn test_zero_limit_removes_everything() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        for age in 1..=2 {
            create_file(temp_dir.path(), &format!("log_{age}"), age);
        }

        assert_eq!(enforce_retention(temp_dir.path(), 0).unwrap().len(), 2);
        assert!(names(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_directory_entry_fails_the_pass() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        create_file(temp_dir.path(), "log_2", 2);
        create_file(temp_dir.path(), "log_3", 3);
        // newer than log_2 and log_3, older than log_1
        fs::create_dir(temp_dir.path().join("nested")).unwrap();
        let file = File::create(temp_dir.path().join("log_1")).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(3600))
            .unwrap();

        let err = enforce_retention(temp_dir.path(), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Retention);
        // the older files after the failed entry are left alone
        assert_eq!(
            names(temp_dir.path()),
            vec!["log_1", "log_2", "log_3", "nested"]
        );
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let err = enforce_retention(&temp_dir.path().join("missing"), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Retention);
    }
}
