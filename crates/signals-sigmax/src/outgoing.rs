//! Sending a signal to CityControl.
//!
//! A dispatch is two messages: `CreeerZaak_Lk01` creates the case, then
//! `VoegZaakdocumentToe_Lk01` attaches a PDF with the signal's details. The
//! outcome is written back to the signal as a status (case) or a note
//! (document). Retrying is up to the caller's scheduler.

use crate::error::SigmaxError;
use crate::messages::StufMessages;
use crate::pdf::DocumentRenderer;
use crate::response::StufResponse;
use crate::sequence::SequenceNumber;
use crate::transport::{CREEER_ZAAK_SOAPACTION, StufTransport, VOEG_ZAAKDOCUMENT_TOE_SOAPACTION};
use chrono::Utc;
use signals_core::signal::NewNote;
use signals_core::{RoundtripRepository, Signal, SignalActions, State, StatusUpdate};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const SEND_FAILED_TEXT: &str = "Verzending van melding naar THOR is mislukt.";
pub const SENT_TOO_OFTEN_TEXT: &str =
    "Verzending van melding naar THOR is mislukt (te vaak verzonden).";
pub const PDF_NOT_SENT_NOTE: &str = "Let op, PDF waarschijnlijk niet verzonden.";

pub fn sent_text(signal: &Signal, sequence_number: SequenceNumber) -> String {
    format!(
        "Verzending van melding naar THOR is gelukt onder nummer {}.{}.",
        signal.sia_id(),
        sequence_number
    )
}

/// Result of [`SigmaxOutgoing::handle_send_signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub sequence_number: SequenceNumber,
    /// Whether CityControl accepted the case.
    pub case_created: bool,
    /// Whether CityControl accepted the PDF.
    pub document_attached: bool,
}

/// Outbound CityControl integration.
pub struct SigmaxOutgoing {
    transport: Arc<dyn StufTransport>,
    documents: Arc<dyn DocumentRenderer>,
    actions: Arc<dyn SignalActions>,
    roundtrips: Arc<dyn RoundtripRepository>,
    messages: StufMessages,
}

impl SigmaxOutgoing {
    pub fn new(
        transport: Arc<dyn StufTransport>,
        documents: Arc<dyn DocumentRenderer>,
        actions: Arc<dyn SignalActions>,
        roundtrips: Arc<dyn RoundtripRepository>,
        messages: StufMessages,
    ) -> Self {
        Self {
            transport,
            documents,
            actions,
            roundtrips,
            messages,
        }
    }

    /// Sends a signal to CityControl, followed by its PDF.
    ///
    /// The PDF goes out even when the case was not acknowledged, so a failed
    /// attachment always leaves a note on the signal.
    ///
    /// Fails with [`SigmaxError::TooManyRoundtrips`] after marking the signal
    /// as failed when its sequence numbers are used up. Delivery failures of
    /// the individual messages are reported in the outcome, not as errors.
    pub async fn handle_send_signal(&self, signal: &Signal) -> Result<DispatchOutcome, SigmaxError> {
        let roundtrips = self.roundtrips.count(signal.id).await?;
        let sequence_number = match SequenceNumber::next(signal, roundtrips) {
            Ok(sequence_number) => sequence_number,
            Err(err) => {
                warn!(signal_id = signal.id, roundtrips, "Signal sent to CityControl too often");
                self.actions
                    .update_status(
                        signal.id,
                        StatusUpdate::new(State::VerzendenMislukt).with_text(SENT_TOO_OFTEN_TEXT),
                    )
                    .await?;
                return Err(err);
            }
        };

        let case_created = self.send_signal(signal, sequence_number).await?;
        let document_attached = self.send_signal_pdf(signal, sequence_number).await?;

        Ok(DispatchOutcome {
            sequence_number,
            case_created,
            document_attached,
        })
    }

    /// Creates a case (zaak) in CityControl and records the outcome on the signal.
    ///
    /// On success a roundtrip is recorded, so the next dispatch of this signal
    /// uses the next sequence number, and the signal moves to `Verzonden`.
    /// Otherwise it moves to `VerzendenMislukt`.
    pub async fn send_signal(
        &self,
        signal: &Signal,
        sequence_number: SequenceNumber,
    ) -> Result<bool, SigmaxError> {
        let success = match self.send_creeer_zaak(signal, sequence_number).await {
            Ok(response) => response.is_ok(),
            Err(err) if err.is_delivery_failure() => {
                warn!(signal_id = signal.id, error = %err, "Case creation not delivered");
                false
            }
            Err(err) => return Err(err),
        };

        let update = if success {
            self.roundtrips.record(signal.id).await?;
            StatusUpdate::new(State::Verzonden).with_text(sent_text(signal, sequence_number))
        } else {
            StatusUpdate::new(State::VerzendenMislukt).with_text(SEND_FAILED_TEXT)
        };
        self.actions.update_status(signal.id, update).await?;

        Ok(success)
    }

    /// Attaches the signal's PDF to its case in CityControl.
    ///
    /// A note is added to the signal whenever the document may not have
    /// arrived. Unexpected errors are propagated after adding the note.
    pub async fn send_signal_pdf(
        &self,
        signal: &Signal,
        sequence_number: SequenceNumber,
    ) -> Result<bool, SigmaxError> {
        let success = match self.send_voeg_zaakdocument_toe(signal, sequence_number).await {
            Ok(response) => response.is_ok(),
            Err(err) if err.is_delivery_failure() => {
                warn!(signal_id = signal.id, error = %err, "Document not delivered");
                false
            }
            Err(err) => {
                error!(signal_id = signal.id, error = %err, "Sending document failed");
                self.actions
                    .create_note(signal.id, NewNote::new(PDF_NOT_SENT_NOTE))
                    .await?;
                return Err(err);
            }
        };

        if !success {
            self.actions
                .create_note(signal.id, NewNote::new(PDF_NOT_SENT_NOTE))
                .await?;
        }

        Ok(success)
    }

    /// Generates and sends `CreeerZaak_Lk01`.
    pub async fn send_creeer_zaak(
        &self,
        signal: &Signal,
        sequence_number: SequenceNumber,
    ) -> Result<StufResponse, SigmaxError> {
        let message = self
            .messages
            .creeer_zaak_lk01(signal, sequence_number, Utc::now())?;
        self.send(signal, &message, CREEER_ZAAK_SOAPACTION).await
    }

    /// Generates and sends `VoegZaakdocumentToe_Lk01` with the signal's PDF.
    pub async fn send_voeg_zaakdocument_toe(
        &self,
        signal: &Signal,
        sequence_number: SequenceNumber,
    ) -> Result<StufResponse, SigmaxError> {
        let pdf = self.documents.render(signal)?;
        let message = self
            .messages
            .voeg_zaakdocument_toe_lk01(signal, sequence_number, &pdf, Utc::now())?;
        self.send(signal, &message, VOEG_ZAAKDOCUMENT_TOE_SOAPACTION).await
    }

    async fn send(
        &self,
        signal: &Signal,
        message: &str,
        soap_action: &str,
    ) -> Result<StufResponse, SigmaxError> {
        let response = self.transport.send(message, soap_action).await?;
        info!(
            signal_id = signal.id,
            soap_action,
            status = response.status,
            "Sent STUF message"
        );
        debug!(body = %response.body, "Received");
        Ok(response)
    }
}
