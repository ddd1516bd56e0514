use super::open_store;
use anyhow::Result;
use signals_application::{PushOutcome, SigmaxPushService};
use signals_infrastructure::load_sigmax_config;
use std::path::PathBuf;
use std::sync::Arc;

pub async fn execute(signal_id: i64, store: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let config = load_sigmax_config(config.as_deref())?;
    let store = Arc::new(open_store(store)?);
    let service = SigmaxPushService::with_store(&config, store)?;

    match service.push_to_sigmax(signal_id).await? {
        PushOutcome::NotFound => anyhow::bail!("Signal {signal_id} not found"),
        PushOutcome::Skipped { state } => {
            println!(
                "Signal {signal_id} is not queued for Sigmax (state: {})",
                state.label()
            );
        }
        PushOutcome::Dispatched(outcome) if outcome.case_created => {
            println!(
                "SIA-{signal_id}.{} sent to CityControl",
                outcome.sequence_number
            );
            if !outcome.document_attached {
                println!("PDF was probably not attached");
            }
        }
        PushOutcome::Dispatched(_) => {
            anyhow::bail!("Sending SIA-{signal_id} to CityControl failed")
        }
    }

    Ok(())
}
