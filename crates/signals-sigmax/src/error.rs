//! Errors raised while talking to CityControl.

use signals_core::SignalsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SigmaxError {
    /// Server URL or auth token missing from the configuration
    #[error("SIGMAX_AUTH_TOKEN or SIGMAX_SERVER not configured")]
    NotConfigured,

    /// The request did not complete (connection, TLS, timeout, body read)
    #[error("Request to CityControl failed: {0}")]
    Transport(String),

    /// CityControl answered with a 4xx/5xx status
    #[error("CityControl responded with HTTP {status}")]
    HttpStatus { status: u16, body: String },

    /// The per-signal sequence numbers are used up
    #[error("Signal {sia_id} was sent to Sigmax/CityControl too often ({roundtrips} roundtrips)")]
    TooManyRoundtrips { sia_id: String, roundtrips: usize },

    #[error("Failed to render {template}: {source}")]
    Render {
        template: &'static str,
        #[source]
        source: minijinja::Error,
    },

    /// The attachment for a case could not be generated
    #[error("Failed to generate document: {0}")]
    Document(String),

    /// A collaborator (status update, note, roundtrip store) failed
    #[error(transparent)]
    Signals(#[from] SignalsError),
}

impl SigmaxError {
    /// Whether the message could not be delivered to CityControl.
    ///
    /// Delivery failures are expected in operation and are turned into a
    /// failed dispatch; everything else is a bug or an outage of our own
    /// collaborators and is propagated.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(
            self,
            Self::NotConfigured
                | Self::Transport(_)
                | Self::HttpStatus { .. }
                | Self::TooManyRoundtrips { .. }
        )
    }
}
