//! TOML file-backed store.
//!
//! Directory structure:
//! ```text
//! base_dir/
//! ├── signals/
//! │   ├── 1.toml         # SignalRecord: signal, status history, notes
//! │   └── 2.toml
//! └── roundtrips.toml    # delivered roundtrips per signal
//! ```

use crate::record::SignalRecord;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use signals_core::signal::{NewNote, Note};
use signals_core::{
    Result, RoundtripRepository, Signal, SignalActions, SignalRepository, SignalsError, Status,
    StatusUpdate,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
struct RoundtripCounts {
    /// Keyed by signal id; TOML keys are strings.
    #[serde(default)]
    counts: BTreeMap<String, usize>,
}

/// Default location of the store: `<data dir>/signals`.
pub fn default_store_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("signals"))
        .ok_or_else(|| SignalsError::config("Cannot determine data directory"))
}

/// Persists signals and roundtrips as TOML files under a base directory.
pub struct TomlSignalStore {
    base_dir: PathBuf,
}

impl TomlSignalStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn signal_file(&self, signal_id: i64) -> AtomicTomlFile<SignalRecord> {
        AtomicTomlFile::new(
            self.base_dir
                .join("signals")
                .join(format!("{signal_id}.toml")),
        )
    }

    fn roundtrips_file(&self) -> AtomicTomlFile<RoundtripCounts> {
        AtomicTomlFile::new(self.base_dir.join("roundtrips.toml"))
    }

    /// Loads the full record (history and notes included).
    pub fn load_record(&self, signal_id: i64) -> Result<Option<SignalRecord>> {
        self.signal_file(signal_id).load()
    }

    /// Applies `f` to an existing record under the file lock.
    fn update_record<R>(
        &self,
        signal_id: i64,
        f: impl FnOnce(&mut SignalRecord) -> Result<R>,
    ) -> Result<R> {
        self.signal_file(signal_id)
            .update_existing(SignalsError::not_found("signal", signal_id), f)
    }
}

#[async_trait]
impl SignalRepository for TomlSignalStore {
    async fn find_by_id(&self, signal_id: i64) -> Result<Option<Signal>> {
        Ok(self.load_record(signal_id)?.map(|record| record.signal))
    }

    async fn save(&self, signal: &Signal) -> Result<()> {
        debug!(signal_id = signal.id, "Saving signal");
        self.signal_file(signal.id)
            .update(SignalRecord::new(signal.clone()), |record| {
                record.replace_signal(signal.clone());
                Ok(())
            })
    }
}

#[async_trait]
impl SignalActions for TomlSignalStore {
    async fn update_status(&self, signal_id: i64, update: StatusUpdate) -> Result<Status> {
        self.update_record(signal_id, |record| record.apply_status(update, Utc::now()))
    }

    async fn create_note(&self, signal_id: i64, note: NewNote) -> Result<Note> {
        self.update_record(signal_id, |record| Ok(record.add_note(note, Utc::now())))
    }
}

#[async_trait]
impl RoundtripRepository for TomlSignalStore {
    async fn count(&self, signal_id: i64) -> Result<usize> {
        Ok(self
            .roundtrips_file()
            .load()?
            .and_then(|rt| rt.counts.get(&signal_id.to_string()).copied())
            .unwrap_or(0))
    }

    async fn record(&self, signal_id: i64) -> Result<()> {
        self.roundtrips_file()
            .update(RoundtripCounts::default(), |rt| {
                *rt.counts.entry(signal_id.to_string()).or_insert(0) += 1;
                Ok(())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::signal;
    use signals_core::State;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_and_find_round_trip_through_disk() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSignalStore::new(temp_dir.path());

        store.save(&signal(3)).await.unwrap();

        assert!(temp_dir.path().join("signals/3.toml").exists());
        let reopened = TomlSignalStore::new(temp_dir.path());
        assert_eq!(reopened.find_by_id(3).await.unwrap(), Some(signal(3)));
        assert_eq!(reopened.find_by_id(4).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_status_and_notes_are_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSignalStore::new(temp_dir.path());
        store.save(&signal(3)).await.unwrap();

        store
            .update_status(3, StatusUpdate::new(State::VerzendenMislukt).with_text("mislukt"))
            .await
            .unwrap();
        store.create_note(3, NewNote::new("Let op")).await.unwrap();

        let record = store.load_record(3).unwrap().unwrap();
        assert_eq!(record.signal.status.state, State::VerzendenMislukt);
        assert_eq!(record.history.len(), 2);
        assert_eq!(record.notes.len(), 1);
        assert_eq!(record.notes[0].text, "Let op");
    }

    #[tokio::test]
    async fn test_invalid_transition_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSignalStore::new(temp_dir.path());
        store.save(&signal(3)).await.unwrap();

        let err = store
            .update_status(3, StatusUpdate::new(State::Gemeld))
            .await
            .unwrap_err();

        assert!(err.is_invalid_transition());
        assert_eq!(store.load_record(3).unwrap().unwrap().history.len(), 1);
    }

    #[tokio::test]
    async fn test_actions_on_missing_signal() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSignalStore::new(temp_dir.path());

        let err = store
            .update_status(9, StatusUpdate::new(State::Verzonden))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!temp_dir.path().join("signals/9.toml").exists());
    }

    #[tokio::test]
    async fn test_roundtrips_persist() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSignalStore::new(temp_dir.path());

        assert_eq!(store.count(3).await.unwrap(), 0);
        store.record(3).await.unwrap();
        store.record(3).await.unwrap();
        store.record(4).await.unwrap();

        let reopened = TomlSignalStore::new(temp_dir.path());
        assert_eq!(reopened.count(3).await.unwrap(), 2);
        assert_eq!(reopened.count(4).await.unwrap(), 1);
    }
}
