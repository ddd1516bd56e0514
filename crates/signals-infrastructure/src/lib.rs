//! Storage and configuration for Signals.
//!
//! - [`InMemorySignalStore`] and [`TomlSignalStore`] implement the
//!   `signals_core` repository and action traits
//! - [`config`] loads the CityControl connection settings

pub mod config;
pub mod memory;
pub mod record;
pub mod storage;
pub mod toml_store;

#[cfg(test)]
mod testing;

pub use crate::config::{default_config_path, load_sigmax_config};
pub use crate::memory::InMemorySignalStore;
pub use crate::record::SignalRecord;
pub use crate::toml_store::{TomlSignalStore, default_store_dir};
