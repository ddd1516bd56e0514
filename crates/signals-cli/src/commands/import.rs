use super::{open_store, read_signal};
use anyhow::{Context, Result};
use signals_core::SignalRepository;
use std::path::{Path, PathBuf};
use tracing::info;

pub async fn execute(file: &Path, store: Option<PathBuf>) -> Result<()> {
    let signal = read_signal(file)?;
    let store = open_store(store)?;
    store
        .save(&signal)
        .await
        .with_context(|| format!("Failed to store {}", signal.sia_id()))?;

    info!(signal_id = signal.id, state = %signal.status.state, "Imported signal");
    println!("Stored {} in {}", signal.sia_id(), store.base_dir().display());
    Ok(())
}
