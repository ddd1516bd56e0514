//! The "push to Sigmax" use case.
//!
//! Runs when a signal was queued for CityControl. It is safe to invoke more
//! than once for the same signal: only signals still waiting to be sent are
//! dispatched.

use anyhow::{Context, Result};
use signals_core::{
    RoundtripRepository, Signal, SignalActions, SignalRepository, State, TargetApi,
};
use signals_sigmax::{
    DispatchOutcome, HttpStufTransport, SigmaxConfig, SigmaxOutgoing, SimplePdfRenderer,
    StufMessages,
};
use std::sync::Arc;
use tracing::{info, warn};

/// What happened to a push request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// No signal with this id.
    NotFound,
    /// The signal is not waiting to be sent to CityControl.
    Skipped { state: State },
    Dispatched(DispatchOutcome),
}

/// Whether the signal is queued for CityControl.
pub fn is_signal_applicable(signal: &Signal) -> bool {
    signal.state() == State::TeVerzenden && signal.status.target_api == Some(TargetApi::Sigmax)
}

pub struct SigmaxPushService {
    signals: Arc<dyn SignalRepository>,
    outgoing: SigmaxOutgoing,
}

impl SigmaxPushService {
    pub fn new(signals: Arc<dyn SignalRepository>, outgoing: SigmaxOutgoing) -> Self {
        Self { signals, outgoing }
    }

    /// Wires the HTTP transport and PDF renderer to a store that holds the
    /// signals, their statuses and roundtrips.
    pub fn with_store<S>(config: &SigmaxConfig, store: Arc<S>) -> Result<Self>
    where
        S: SignalRepository + SignalActions + RoundtripRepository + 'static,
    {
        let transport =
            HttpStufTransport::new(config).context("Failed to set up the Sigmax transport")?;
        let messages =
            StufMessages::new(config.api_base.clone()).context("Failed to load STUF templates")?;
        let outgoing = SigmaxOutgoing::new(
            Arc::new(transport),
            Arc::new(SimplePdfRenderer::new()),
            store.clone(),
            store.clone(),
            messages,
        );
        Ok(Self::new(store, outgoing))
    }

    /// Sends the signal to CityControl if it is queued for it.
    ///
    /// Errors are returned for the scheduler to decide on a retry; a signal
    /// that was sent too often is already marked as failed at that point.
    pub async fn push_to_sigmax(&self, signal_id: i64) -> Result<PushOutcome> {
        let Some(signal) = self
            .signals
            .find_by_id(signal_id)
            .await
            .with_context(|| format!("Failed to load signal {signal_id}"))?
        else {
            warn!(signal_id, "Signal to push does not exist");
            return Ok(PushOutcome::NotFound);
        };

        if !is_signal_applicable(&signal) {
            info!(signal_id, state = %signal.status.state, "Signal not queued for Sigmax, skipping");
            return Ok(PushOutcome::Skipped {
                state: signal.status.state,
            });
        }

        let outcome = self
            .outgoing
            .handle_send_signal(&signal)
            .await
            .with_context(|| format!("Failed to send {} to Sigmax", signal.sia_id()))?;

        info!(
            signal_id,
            sequence_number = %outcome.sequence_number,
            case_created = outcome.case_created,
            document_attached = outcome.document_attached,
            "Pushed signal to Sigmax"
        );
        Ok(PushOutcome::Dispatched(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use signals_core::Status;
    use signals_core::signal::{Location, Point};

    fn signal_in(state: State, target_api: Option<TargetApi>) -> Signal {
        let now = Utc::now();
        Signal {
            id: 1,
            text: "Fietswrak".to_string(),
            text_extra: None,
            created_at: now,
            incident_date_start: now,
            incident_date_end: None,
            location: Location::new(Point::new(4.9, 52.37)),
            priority: Default::default(),
            status: Status {
                state,
                text: None,
                user: None,
                target_api,
                created_at: now,
            },
            category: Default::default(),
            reporter: Default::default(),
        }
    }

    #[test]
    fn test_only_queued_sigmax_signals_are_applicable() {
        assert!(is_signal_applicable(&signal_in(
            State::TeVerzenden,
            Some(TargetApi::Sigmax)
        )));
        assert!(!is_signal_applicable(&signal_in(State::TeVerzenden, None)));
        assert!(!is_signal_applicable(&signal_in(
            State::Gemeld,
            Some(TargetApi::Sigmax)
        )));
        assert!(!is_signal_applicable(&signal_in(
            State::VerzendenMislukt,
            Some(TargetApi::Sigmax)
        )));
    }
}
