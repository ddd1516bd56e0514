//! Configuration loading.
//!
//! Settings come from `config.toml` and are overridden by environment
//! variables, so deployments can keep secrets out of the file:
//!
//! ```toml
//! [sigmax]
//! server = "https://citycontrol.example/stuf"
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use signals_core::{Result, SignalsError};
use signals_sigmax::SigmaxConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENV_SIGMAX_SERVER: &str = "SIGMAX_SERVER";
pub const ENV_SIGMAX_AUTH_TOKEN: &str = "SIGMAX_AUTH_TOKEN";
pub const ENV_SIGNALS_API_BASE: &str = "SIGNALS_API_BASE";

/// Root structure of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub sigmax: SigmaxConfig,
}

/// Returns the default config path: `<config dir>/signals/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("signals").join("config.toml"))
}

/// Loads the CityControl settings.
///
/// An explicitly given `path` must exist. Without one, the default path is
/// used when present and built-in defaults otherwise. Environment variables
/// are applied last.
pub fn load_sigmax_config(path: Option<&Path>) -> Result<SigmaxConfig> {
    let file = match path {
        Some(path) => Some(read_config_file(path)?),
        None => match default_config_path() {
            Some(path) if path.exists() => Some(read_config_file(&path)?),
            _ => None,
        },
    };

    let mut config = file.map(|f| f.sigmax).unwrap_or_default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    debug!(?config, "Loaded Sigmax configuration");
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        SignalsError::config(format!(
            "Failed to read configuration file at {}: {}",
            path.display(),
            e
        ))
    })?;

    toml::from_str(&content).map_err(|e| {
        SignalsError::config(format!(
            "Failed to parse configuration file at {}: {}",
            path.display(),
            e
        ))
    })
}

/// Overrides settings with environment variables, read through `lookup`.
pub fn apply_env_overrides(config: &mut SigmaxConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(server) = lookup(ENV_SIGMAX_SERVER) {
        config.server = Some(server);
    }
    if let Some(token) = lookup(ENV_SIGMAX_AUTH_TOKEN) {
        config.auth_token = Some(token);
    }
    if let Some(api_base) = lookup(ENV_SIGNALS_API_BASE) {
        config.api_base = api_base;
    }
}
