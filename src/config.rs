//! Storage location for the task file.

use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// File name used next to the executable when no explicit path is given.
pub const DEFAULT_FILE_NAME: &str = "data.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub path: PathBuf,
}

impl Config {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<directory of the running executable>/data.csv`
    pub fn from_exe_dir() -> Result<Self> {
        let exe = std::env::current_exe().map_err(|source| StoreError::Io {
            path: PathBuf::from("<current executable>"),
            source,
        })?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::new(dir.join(DEFAULT_FILE_NAME)))
    }

    /// Use `override_path` when given, otherwise fall back to the executable directory.
    pub fn resolve(override_path: Option<PathBuf>) -> Result<Self> {
        match override_path {
            Some(p) => Ok(Self::new(p)),
            None => Self::from_exe_dir(),
        }
    }
}
