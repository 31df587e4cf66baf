use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use jester_core::{SlotStore, StorageError};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("data directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the data directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Filesystem-safe filename for a slot: `{key}.json` with anything outside
/// `[A-Za-z0-9_-]` replaced by `_`.
pub fn slot_filename(key: &str) -> String {
    let sanitized: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = if sanitized.is_empty() {
        "slot"
    } else {
        sanitized.as_str()
    };
    format!("{stem}.json")
}

/// Slot store keeping one JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
    writer: AtomicFileWriter,
}

impl FileSlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            writer: AtomicFileWriter::new(dir.clone()),
            dir,
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(slot_filename(key))
    }
}

impl SlotStore for FileSlotStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::ReadCorrupt {
                key: key.to_string(),
                message: err.to_string(),
            }),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writer
            .write(&slot_filename(key), value)
            .map(|_| ())
            .map_err(|err| StorageError::WriteFailed {
                key: key.to_string(),
                message: err.to_string(),
            })
    }
}
