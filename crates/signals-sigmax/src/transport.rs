//! HTTP transport for STUF messages.

use crate::config::SigmaxConfig;
use crate::error::SigmaxError;
use crate::response::StufResponse;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

// The double quotes are part of the SOAP action value.
pub const CREEER_ZAAK_SOAPACTION: &str =
    "\"http://www.egem.nl/StUF/sector/zkn/0310/CreeerZaak_Lk01\"";
pub const VOEG_ZAAKDOCUMENT_TOE_SOAPACTION: &str =
    "\"http://www.egem.nl/StUF/sector/zkn/0310/VoegZaakdocumentToe_Lk01\"";

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=UTF-8";

/// Delivers a STUF message to CityControl.
#[async_trait]
pub trait StufTransport: Send + Sync {
    /// Sends `message` with the given SOAP action.
    ///
    /// Network problems and 4xx/5xx statuses are errors; any other response
    /// is returned for the caller to inspect.
    async fn send(&self, message: &str, soap_action: &str) -> Result<StufResponse, SigmaxError>;
}

/// [`StufTransport`] over HTTP(S) with reqwest.
#[derive(Clone)]
pub struct HttpStufTransport {
    client: Client,
    /// `None` until both server and token are configured.
    endpoint: Option<Endpoint>,
}

#[derive(Clone)]
struct Endpoint {
    server: String,
    auth_token: String,
}

impl HttpStufTransport {
    pub fn new(config: &SigmaxConfig) -> Result<Self, SigmaxError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| SigmaxError::Transport(format!("Failed to build HTTP client: {err}")))?;

        let endpoint = match (&config.server, &config.auth_token) {
            (Some(server), Some(auth_token)) if config.is_configured() => Some(Endpoint {
                server: server.trim().to_string(),
                auth_token: auth_token.trim().to_string(),
            }),
            _ => None,
        };

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl StufTransport for HttpStufTransport {
    async fn send(&self, message: &str, soap_action: &str) -> Result<StufResponse, SigmaxError> {
        let Some(Endpoint { server, auth_token }) = &self.endpoint else {
            return Err(SigmaxError::NotConfigured);
        };

        let response = self
            .client
            .post(server)
            .header("SOAPAction", soap_action)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header(AUTHORIZATION, format!("Basic {auth_token}"))
            .body(message.as_bytes().to_vec())
            .send()
            .await
            .map_err(|err| SigmaxError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SigmaxError::Transport(format!("Failed to read response body: {err}")))?;

        if status.is_client_error() || status.is_server_error() {
            return Err(SigmaxError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(StufResponse {
            status: status.as_u16(),
            body,
        })
    }
}
