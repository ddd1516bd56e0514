//! Stored form of a signal: the aggregate plus its status history and notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signals_core::signal::{NewNote, Note};
use signals_core::{Result, Signal, SignalsError, Status, StatusUpdate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub signal: Signal,
    /// Every status the signal had, oldest first. The last one is current.
    #[serde(default)]
    pub history: Vec<Status>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl SignalRecord {
    pub fn new(signal: Signal) -> Self {
        let history = vec![signal.status.clone()];
        Self {
            signal,
            history,
            notes: Vec::new(),
        }
    }

    /// Replaces the stored signal, keeping history and notes.
    pub fn replace_signal(&mut self, signal: Signal) {
        if self.history.last() != Some(&signal.status) {
            self.history.push(signal.status.clone());
        }
        self.signal = signal;
    }

    /// Applies a status change if the workflow allows it.
    pub fn apply_status(&mut self, update: StatusUpdate, now: DateTime<Utc>) -> Result<Status> {
        let from = self.signal.status.state;
        if !from.can_transition_to(update.state) {
            return Err(SignalsError::InvalidTransition {
                from,
                to: update.state,
            });
        }

        let status = update.into_status(now);
        self.history.push(status.clone());
        self.signal.status = status.clone();
        Ok(status)
    }

    pub fn add_note(&mut self, note: NewNote, now: DateTime<Utc>) -> Note {
        let note = note.into_note(now);
        self.notes.push(note.clone());
        note
    }
}
