//! Domain model for Signals, the municipal incident-reporting backend.
//!
//! A [`Signal`](signal::Signal) is an incident report that moves through the
//! [`workflow`] and may be dispatched to an external case-management system.
//! The traits in [`repository`] are the seams that dispatch adapters call back
//! into.

pub mod error;
pub mod repository;
pub mod signal;
pub mod workflow;

// Re-export common error type
pub use error::{Result, SignalsError};
pub use repository::{RoundtripRepository, SignalActions, SignalRepository};
pub use signal::Signal;
pub use workflow::{State, Status, StatusUpdate, TargetApi};
