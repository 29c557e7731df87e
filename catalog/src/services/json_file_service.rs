use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Whole-document JSON persistence: the entire value set is read and
/// written in one shot, there are no addressable sub-records.
#[derive(Debug, Clone)]
pub struct JsonFileService<V> {
    path: PathBuf,
    _marker: PhantomData<V>,
}

impl<V> JsonFileService<V>
where
    V: Serialize + DeserializeOwned,
{
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory and an initial empty document if the
    /// file does not exist yet.
    pub fn ensure_exists(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !self.path.exists() {
            fs::write(&self.path, "[]")?;
        }

        Ok(())
    }

    /// Reads the full document. An absent file is an empty document; any
    /// other read or parse failure is surfaced to the caller.
    pub fn read_all(&self) -> Result<Vec<V>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_str(&json)?)
    }

    /// Replaces the full document on disk.
    pub fn write_all(&self, values: &[V]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
