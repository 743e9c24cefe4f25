//! The task store: a CSV file holding a header row followed by one row per task.
//!
//! Every operation opens the file, reads or writes it completely and closes it
//! again before returning. `add` appends a single row; `complete` and `delete`
//! rewrite the whole file through a temporary file that is renamed over the
//! original, so a failed write never leaves a truncated task list behind.
//! There is no locking: two processes mutating the same file can race.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::model::{check_header, Task, HEADER};

pub struct TaskStore {
    config: Config,
}

impl TaskStore {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.config.path.clone(),
            source,
        }
    }

    /// Reset the task file to a lone header row, creating it (and its
    /// directory) if needed.
    pub fn init(&self) -> Result<()> {
        let dir = self.dir();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        self.rewrite(&[])?;
        info!("initialized {}", self.path().display());
        Ok(())
    }

    /// Read every task in file order.
    pub fn load(&self) -> Result<Vec<Task>> {
        let content = self.read()?;
        let rows = parse_rows(self.path(), &content)?;
        Ok(rows.into_iter().map(|(_, task)| task).collect())
    }

    /// Append a new open task with id `max(existing) + 1`, or 1 for an empty list.
    pub fn add(&self, description: &str) -> Result<Task> {
        let content = self.read()?;
        let rows = parse_rows(self.path(), &content)?;
        let next_id = match rows.iter().max_by_key(|(_, t)| t.id) {
            None => 1,
            Some((line, max)) => max.id.checked_add(1).ok_or_else(|| {
                let reason = format!("id {} leaves no room for a next id", max.id);
                StoreError::malformed(*line, reason)
            })?,
        };
        let task = Task::new(next_id, description);

        let mut file = OpenOptions::new()
            .append(true)
            .open(self.path())
            .map_err(|e| self.io_err(e))?;
        // Hand-edited files may lack a final newline; don't glue onto the last row.
        if content.last().is_some_and(|&b| b != b'\n') {
            file.write_all(b"\n").map_err(|e| self.io_err(e))?;
        }
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(task.to_record())
            .map_err(|e| StoreError::from_csv(self.path(), e))?;
        writer.flush().map_err(|e| self.io_err(e))?;

        debug!("appended task {} to {}", task.id, self.path().display());
        Ok(task)
    }

    /// All tasks when `all` is set, otherwise only those not yet completed.
    pub fn list(&self, all: bool) -> Result<Vec<Task>> {
        let tasks = self.load()?;
        Ok(tasks.into_iter().filter(|t| all || !t.completed).collect())
    }

    /// Mark task `id` completed and return its updated row.
    pub fn complete(&self, id: u64) -> Result<Task> {
        let mut tasks = self.load()?;
        let idx = find(&tasks, id)?;
        tasks[idx].completed = true;
        self.rewrite(&tasks)?;
        debug!("completed task {id}");
        Ok(tasks[idx].clone())
    }

    /// Remove task `id` and return the removed row.
    pub fn delete(&self, id: u64) -> Result<Task> {
        let mut tasks = self.load()?;
        let idx = find(&tasks, id)?;
        let removed = tasks.remove(idx);
        self.rewrite(&tasks)?;
        debug!("deleted task {id}");
        Ok(removed)
    }

    fn dir(&self) -> PathBuf {
        match self.path().parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn read(&self) -> Result<Vec<u8>> {
        let content = fs::read(self.path()).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound {
                    path: self.config.path.clone(),
                }
            } else {
                self.io_err(e)
            }
        })?;
        debug!("read {} bytes from {}", content.len(), self.path().display());
        Ok(content)
    }

    /// Write header plus `tasks` to a temp file beside the target, then rename
    /// it into place.
    fn rewrite(&self, tasks: &[Task]) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(self.dir()).map_err(|e| self.io_err(e))?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
            writer
                .write_record(HEADER)
                .map_err(|e| StoreError::from_csv(self.path(), e))?;
            for task in tasks {
                writer
                    .write_record(task.to_record())
                    .map_err(|e| StoreError::from_csv(self.path(), e))?;
            }
            writer.flush().map_err(|e| self.io_err(e))?;
        }
        tmp.as_file().sync_all().map_err(|e| self.io_err(e))?;

        // Keep the permissions of the file being replaced.
        if let Ok(meta) = fs::metadata(self.path()) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| self.io_err(e))?;
        }

        tmp.persist(self.path()).map_err(|e| self.io_err(e.error))?;
        debug!("rewrote {} with {} task(s)", self.path().display(), tasks.len());
        Ok(())
    }
}

/// Index of the task with `id`, or `TaskNotFound`.
fn find(tasks: &[Task], id: u64) -> Result<usize> {
    tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or(StoreError::TaskNotFound(id))
}

/// Decode the header and every row, pairing each task with the line it starts on.
fn parse_rows(path: &Path, content: &[u8]) -> Result<Vec<(u64, Task)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut records = reader.records();
    let header = match records.next() {
        Some(r) => r.map_err(|e| StoreError::from_csv(path, e))?,
        None => return Err(StoreError::malformed(1, "missing header row")),
    };
    check_header(&header)?;

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for result in records {
        let record = result.map_err(|e| StoreError::from_csv(path, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let task = Task::from_record(&record, line)?;
        if !seen.insert(task.id) {
            return Err(StoreError::malformed(
                line,
                format!("duplicate id {}", task.id),
            ));
        }
        rows.push((line, task));
    }
    Ok(rows)
}
