//! In-memory store, used by tests and one-off tooling.

use crate::record::SignalRecord;
use async_trait::async_trait;
use chrono::Utc;
use signals_core::signal::{NewNote, Note};
use signals_core::{
    Result, RoundtripRepository, Signal, SignalActions, SignalRepository, SignalsError, Status,
    StatusUpdate,
};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Inner {
    records: HashMap<i64, SignalRecord>,
    roundtrips: HashMap<i64, usize>,
}

/// Keeps signals, their history and roundtrip counts in memory.
#[derive(Default)]
pub struct InMemorySignalStore {
    inner: RwLock<Inner>,
}

impl InMemorySignalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| SignalsError::internal("signal store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| SignalsError::internal("signal store lock poisoned"))
    }

    /// Status history of a signal, oldest first.
    pub fn history(&self, signal_id: i64) -> Result<Vec<Status>> {
        self.read()?
            .records
            .get(&signal_id)
            .map(|record| record.history.clone())
            .ok_or_else(|| SignalsError::not_found("signal", signal_id))
    }

    pub fn notes(&self, signal_id: i64) -> Result<Vec<Note>> {
        self.read()?
            .records
            .get(&signal_id)
            .map(|record| record.notes.clone())
            .ok_or_else(|| SignalsError::not_found("signal", signal_id))
    }
}

#[async_trait]
impl SignalRepository for InMemorySignalStore {
    async fn find_by_id(&self, signal_id: i64) -> Result<Option<Signal>> {
        Ok(self
            .read()?
            .records
            .get(&signal_id)
            .map(|record| record.signal.clone()))
    }

    async fn save(&self, signal: &Signal) -> Result<()> {
        let mut inner = self.write()?;
        match inner.records.get_mut(&signal.id) {
            Some(record) => record.replace_signal(signal.clone()),
            None => {
                inner
                    .records
                    .insert(signal.id, SignalRecord::new(signal.clone()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SignalActions for InMemorySignalStore {
    async fn update_status(&self, signal_id: i64, update: StatusUpdate) -> Result<Status> {
        self.write()?
            .records
            .get_mut(&signal_id)
            .ok_or_else(|| SignalsError::not_found("signal", signal_id))?
            .apply_status(update, Utc::now())
    }

    async fn create_note(&self, signal_id: i64, note: NewNote) -> Result<Note> {
        Ok(self
            .write()?
            .records
            .get_mut(&signal_id)
            .ok_or_else(|| SignalsError::not_found("signal", signal_id))?
            .add_note(note, Utc::now()))
    }
}

#[async_trait]
impl RoundtripRepository for InMemorySignalStore {
    async fn count(&self, signal_id: i64) -> Result<usize> {
        Ok(self
            .read()?
            .roundtrips
            .get(&signal_id)
            .copied()
            .unwrap_or(0))
    }

    async fn record(&self, signal_id: i64) -> Result<()> {
        *self.write()?.roundtrips.entry(signal_id).or_insert(0) += 1;
        Ok(())
    }
}
