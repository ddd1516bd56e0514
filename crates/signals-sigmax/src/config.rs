//! Connection settings for CityControl.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_API_BASE: &str = "https://acc.api.data.amsterdam.nl";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the outbound CityControl connection.
///
/// `server` and `auth_token` are optional on purpose: a deployment without
/// them still starts, and every send attempt fails as a delivery failure.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigmaxConfig {
    /// Endpoint the STUF messages are POSTed to.
    pub server: Option<String>,
    /// Credentials sent as `Authorization: Basic <auth_token>`.
    pub auth_token: Option<String>,
    /// Base URL of the Signals API, used for links in outgoing messages.
    pub api_base: String,
    pub timeout_secs: u64,
    /// CityControl endpoints are reached without certificate verification.
    pub accept_invalid_certs: bool,
}

impl Default for SigmaxConfig {
    fn default() -> Self {
        Self {
            server: None,
            auth_token: None,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certs: true,
        }
    }
}

impl SigmaxConfig {
    /// Whether both the server and the auth token are set and non-empty.
    pub fn is_configured(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        present(&self.server) && present(&self.auth_token)
    }
}

impl fmt::Debug for SigmaxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigmaxConfig")
            .field("server", &self.server)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_configured() {
        let config = SigmaxConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn test_blank_values_do_not_count() {
        let config = SigmaxConfig {
            server: Some("https://sigmax.example".into()),
            auth_token: Some("  ".into()),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = SigmaxConfig {
            auth_token: Some("c2VjcmV0".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("c2VjcmV0"));
        assert!(debug.contains("<redacted>"));
    }
}
