use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::StorageError;

/// A RON document replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file does not exist yet.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        ron::from_str(&content)
            .map(Some)
            .map_err(|err| StorageError::Deserialize {
                path: self.path.clone(),
                message: err.to_string(),
            })
    }

    /// Writes a temp file next to the target, syncs it, then renames it over
    /// the target. Readers see the old or the new document, never a mix.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), StorageError> {
        let content = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::new())
            .map_err(|err| StorageError::Serialize(err.to_string()))?;

        let dir = self.parent_dir();
        fs::create_dir_all(&dir)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|err| StorageError::Io(err.error))?;
        Ok(())
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}
