//! Outbound integration with CityControl, the case-management system run by
//! Sigmax.
//!
//! Signals are delivered as StUF-ZKN messages in SOAP envelopes over HTTP:
//!
//! 1. [`SequenceNumber`] derives the suffix of the case identifier from the
//!    number of earlier deliveries;
//! 2. [`StufMessages`] renders `CreeerZaak_Lk01` and
//!    `VoegZaakdocumentToe_Lk01` from embedded templates;
//! 3. a [`StufTransport`] POSTs them, and [`stuf_response_ok`] checks for the
//!    `Bv03` acknowledgement;
//! 4. [`SigmaxOutgoing`] drives the two steps and reports the outcome back to
//!    the signal through the `signals_core` collaborator traits.
//!
//! # Usage
//!
//! ```ignore
//! let outgoing = SigmaxOutgoing::new(
//!     Arc::new(HttpStufTransport::new(&config)?),
//!     Arc::new(SimplePdfRenderer::new()),
//!     store.clone(),
//!     store.clone(),
//!     StufMessages::new(config.api_base.clone())?,
//! );
//! let outcome = outgoing.handle_send_signal(&signal).await?;
//! ```

pub mod address;
pub mod config;
pub mod error;
pub mod messages;
pub mod omschrijving;
pub mod outgoing;
pub mod pdf;
pub mod response;
pub mod sequence;
pub mod transport;

#[cfg(test)]
mod testing;

pub use config::SigmaxConfig;
pub use error::SigmaxError;
pub use messages::StufMessages;
pub use outgoing::{DispatchOutcome, SigmaxOutgoing};
pub use pdf::{DocumentRenderer, SimplePdfRenderer};
pub use response::{StufResponse, stuf_response_ok};
pub use sequence::{MAX_ROUND_TRIPS, SequenceNumber};
pub use transport::{HttpStufTransport, StufTransport};
