//! Collaborator traits.
//!
//! These decouple the dispatch logic from how signals, notes and roundtrips
//! are persisted (in memory, TOML files, a database).

use crate::error::Result;
use crate::signal::{NewNote, Note, Signal};
use crate::workflow::{Status, StatusUpdate};
use async_trait::async_trait;

/// Loads and stores signals.
#[async_trait]
pub trait SignalRepository: Send + Sync {
    /// Finds a signal by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Signal))`: Signal found
    /// - `Ok(None)`: Signal not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, signal_id: i64) -> Result<Option<Signal>>;

    /// Saves a signal, replacing any stored version with the same ID.
    async fn save(&self, signal: &Signal) -> Result<()>;
}

/// Actions that change a signal as a side effect of processing it.
#[async_trait]
pub trait SignalActions: Send + Sync {
    /// Appends a status to the signal's history and makes it current.
    ///
    /// Fails with `SignalsError::InvalidTransition` when the workflow does not
    /// allow moving from the current state to `update.state`.
    async fn update_status(&self, signal_id: i64, update: StatusUpdate) -> Result<Status>;

    /// Attaches a note to the signal.
    async fn create_note(&self, signal_id: i64, note: NewNote) -> Result<Note>;
}

/// Counts successful deliveries of a signal to CityControl.
#[async_trait]
pub trait RoundtripRepository: Send + Sync {
    /// Number of roundtrips recorded for the signal.
    async fn count(&self, signal_id: i64) -> Result<usize>;

    /// Records one more roundtrip for the signal.
    async fn record(&self, signal_id: i64) -> Result<()>;
}
