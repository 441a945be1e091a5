use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{RecordError, StorageError};
use crate::lists::TaskList;
use crate::models::Task;

/// Location used when neither `--file` nor `MEEP_DB` is given.
pub const DEFAULT_PATH: &str = "data/meep.txt";

/// Returns the path to the task file.
///
/// The path is determined in the following order:
/// 1. `MEEP_DB` environment variable.
/// 2. `data/meep.txt`, relative to the working directory.
pub fn db_path() -> PathBuf {
    std::env::var("MEEP_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_PATH))
}

/// Outcome of a load that found the file.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of tasks appended to the list.
    pub loaded: usize,
    /// 1-based line numbers of records that failed to parse, with the reason.
    pub skipped: Vec<(usize, RecordError)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Reads and writes the task list as one pipe-delimited record per line.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Storage::new(db_path())
    }
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Storage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes every task to the file, overwriting it.
    ///
    /// Missing parent directories are created. The write is not atomic; a crash
    /// part-way through can leave a truncated file.
    pub fn save(&self, tasks: &TaskList) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io(e))?;
        }
        let mut s = String::new();
        for task in tasks {
            s.push_str(&task.serialize());
            s.push('\n');
        }
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| self.io(e))?;
        f.write_all(s.as_bytes()).map_err(|e| self.io(e))?;
        info!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    /// Replaces the contents of `tasks` with the records in the file.
    ///
    /// A missing file leaves `tasks` untouched. Otherwise the list is cleared
    /// first; each malformed line is skipped and reported while the rest load.
    /// Blank lines are ignored.
    pub fn load(&self, tasks: &mut TaskList) -> Result<LoadReport, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::NotFound(self.path.clone()));
        }
        let mut f = OpenOptions::new()
            .read(true)
            .open(&self.path)
            .map_err(|e| self.io(e))?;
        let mut s = String::new();
        f.read_to_string(&mut s).map_err(|e| self.io(e))?;

        tasks.clear();
        let mut report = LoadReport::default();
        for (i, line) in s.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match Task::deserialize(line) {
                Ok(task) => {
                    tasks.push(task);
                    report.loaded += 1;
                }
                Err(e) => {
                    warn!(path = %self.path.display(), line = i + 1, error = %e, "skipping malformed record");
                    report.skipped.push((i + 1, e));
                }
            }
        }
        info!(
            path = %self.path.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "loaded tasks"
        );
        Ok(report)
    }

    fn io(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
