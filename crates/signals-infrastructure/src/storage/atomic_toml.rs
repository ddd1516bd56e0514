//! Atomic TOML file operations.
//!
//! Writes go to a temporary file that is synced and renamed over the target,
//! and read-modify-write cycles hold an exclusive lock on a sibling `.lock`
//! file, so concurrent CLI invocations cannot lose updates. The lock file is
//! never removed: every process must contend on the same inode.

use serde::{Serialize, de::DeserializeOwned};
use signals_core::{Result, SignalsError};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A handle to a TOML file holding one `T`.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    /// Saves data to the file atomically (temp file + rename).
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Loads the current value (or `default_value`), applies `f` and saves the
    /// result, all under an exclusive lock. Nothing is written when `f` fails.
    pub fn update<F, R>(&self, default_value: T, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> Result<R>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        let result = f(&mut data)?;
        self.save(&data)?;

        Ok(result)
    }

    /// Like [`update`](Self::update), but fails with `missing` when nothing
    /// is stored yet.
    pub fn update_existing<F, R>(&self, missing: SignalsError, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> Result<R>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.ok_or(missing)?;
        let result = f(&mut data)?;
        self.save(&data)?;

        Ok(result)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| SignalsError::internal("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| SignalsError::internal("Path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Exclusive lock on `<path>.lock`, released on drop.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        fs2::FileExt::lock_exclusive(&file)
            .map_err(|e| SignalsError::data_access(format!("Failed to acquire lock: {e}")))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}
