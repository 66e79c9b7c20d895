//! Configuration for unibridge.
//!
//! Settings are layered with figment: built-in defaults, then a TOML file,
//! then `UNIFI_*` environment variables. The API key is resolved separately
//! through a credential chain (named env var, OS keyring, plaintext) and
//! everything is translated into a [`unibridge_api::ClientConfig`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use unibridge_api::transport::DEFAULT_MAX_RESPONSE_BYTES;
use unibridge_api::{ClientConfig, TlsMode, TransportConfig};

const KEYRING_SERVICE: &str = "unibridge";

/// Environment variable prefix. `UNIFI_BASE_URL` maps to `base_url`, etc.
pub const ENV_PREFIX: &str = "UNIFI_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API key configured for site '{site}'")]
    NoCredentials { site: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Everything needed to reach one controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Network application root, e.g. `https://192.168.1.1/proxy/network`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Default site ID for site-scoped calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,

    /// API key in plaintext. Prefer `api_key_env` or the keyring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Name of an environment variable holding the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Accept any TLS certificate (self-signed appliances).
    #[serde(default)]
    pub insecure: bool,

    /// Additional CA certificate (PEM) to trust.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: None,
            site_id: None,
            api_key: None,
            api_key_env: None,
            insecure: false,
            ca_cert: None,
            timeout_secs: default_timeout_secs(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

// ── Config file path ────────────────────────────────────────────────

/// Platform config path, e.g. `~/.config/unibridge/config.toml` on Linux.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "unibridge", "unibridge").map_or_else(
        || PathBuf::from(".unibridge").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading / saving ────────────────────────────────────────────────

/// The layered provider: defaults, TOML file, then `UNIFI_*` env vars.
/// A missing file is not an error.
pub fn figment(path: Option<&Path>) -> Figment {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
}

pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let settings: Settings = figment(path).extract()?;
    Ok(settings)
}

/// Write `settings` as TOML, creating parent directories.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(settings)?)?;
    debug!(path = %path.display(), "wrote config");
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_entry(site: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(KEYRING_SERVICE, &format!("{site}/api-key"))?)
}

/// Store an API key in the OS keyring under `unibridge/<site>/api-key`.
pub fn store_api_key(site: &str, key: &SecretString) -> Result<(), ConfigError> {
    keyring_entry(site)?.set_password(key.expose_secret())?;
    Ok(())
}

impl Settings {
    /// Site ID, trimmed, or a validation error when missing.
    pub fn site(&self) -> Result<&str, ConfigError> {
        self.site_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::invalid("site_id", "a default site ID is required"))
    }

    /// Resolve the API key: the variable named by `api_key_env`, then the
    /// OS keyring, then the plaintext `api_key` (which `UNIFI_API_KEY` fills).
    pub fn resolve_api_key(&self) -> Result<SecretString, ConfigError> {
        let site = self.site()?;

        if let Some(var) = self.api_key_env.as_deref() {
            match std::env::var(var) {
                Ok(value) if !value.trim().is_empty() => {
                    return Ok(SecretString::from(value.trim().to_owned()));
                }
                _ => debug!(var, "api_key_env is set but the variable is empty"),
            }
        }

        let stored = keyring_entry(site)
            .ok()
            .and_then(|entry| entry.get_password().ok());
        if let Some(secret) = stored {
            return Ok(SecretString::from(secret));
        }

        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(SecretString::from(key.to_owned())),
            _ => Err(ConfigError::NoCredentials { site: site.into() }),
        }
    }

    fn tls_mode(&self) -> TlsMode {
        if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ca) = &self.ca_cert {
            TlsMode::CustomCa(ca.clone())
        } else {
            TlsMode::System
        }
    }

    /// Validate and translate into the client's construction parameters.
    pub fn to_client_config(&self) -> Result<ClientConfig, ConfigError> {
        let raw = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::invalid("base_url", "a controller URL is required"))?;
        let base_url = url::Url::parse(raw)
            .map_err(|e| ConfigError::invalid("base_url", format!("{raw}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "base_url",
                format!("expected an http(s) URL, got {raw}"),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("timeout_secs", "must be at least 1"));
        }

        let default_site = self.site()?.to_owned();
        let api_key = self.resolve_api_key()?;

        Ok(ClientConfig {
            base_url,
            api_key,
            default_site,
            transport: TransportConfig {
                tls: self.tls_mode(),
                timeout: Duration::from_secs(self.timeout_secs),
                max_response_bytes: self.max_response_bytes,
            },
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::result_large_err)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;

    use super::*;

    fn load(jail_path: &str) -> Result<Settings, figment::Error> {
        load_settings(Some(Path::new(jail_path))).map_err(|e| e.to_string().into())
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let settings = load("missing.toml")?;
            assert_eq!(settings, Settings::default());
            assert_eq!(settings.timeout_secs, 30);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "unibridge.toml",
                r#"
                    base_url = "https://10.0.0.1/proxy/network"
                    site_id = "from-file"
                    timeout_secs = 10
                "#,
            )?;
            jail.set_env("UNIFI_SITE_ID", "from-env");
            jail.set_env("UNIFI_INSECURE", "true");

            let settings = load("unibridge.toml")?;
            assert_eq!(settings.base_url.as_deref(), Some("https://10.0.0.1/proxy/network"));
            assert_eq!(settings.site_id.as_deref(), Some("from-env"));
            assert_eq!(settings.timeout_secs, 10);
            assert!(settings.insecure);
            Ok(())
        });
    }

    #[test]
    fn named_env_var_supplies_api_key() {
        Jail::expect_with(|jail| {
            jail.set_env("UNIFI_BASE_URL", "https://unifi.local/proxy/network");
            jail.set_env("UNIFI_SITE_ID", "site-1");
            jail.set_env("UNIFI_API_KEY_ENV", "MY_UNIFI_KEY");
            jail.set_env("MY_UNIFI_KEY", "k-from-named-var");

            let config = load("none.toml")?.to_client_config().unwrap();
            assert_eq!(config.api_key.expose_secret(), "k-from-named-var");
            assert_eq!(config.default_site, "site-1");
            assert_eq!(config.transport.tls, TlsMode::System);
            assert_eq!(config.transport.timeout, Duration::from_secs(30));
            Ok(())
        });
    }

    #[test]
    fn missing_site_is_a_validation_error() {
        let settings = Settings {
            base_url: Some("https://unifi.local".into()),
            api_key: Some("k".into()),
            ..Settings::default()
        };
        let err = settings.to_client_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "site_id"));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let settings = Settings {
            base_url: Some("ftp://unifi.local".into()),
            site_id: Some("s".into()),
            api_key: Some("k".into()),
            ..Settings::default()
        };
        let err = settings.to_client_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "base_url"));
    }

    #[test]
    fn insecure_wins_over_custom_ca() {
        let settings = Settings {
            insecure: true,
            ca_cert: Some(PathBuf::from("/etc/ca.pem")),
            ..Settings::default()
        };
        assert_eq!(settings.tls_mode(), TlsMode::DangerAcceptInvalid);
    }

    #[test]
    fn saved_settings_round_trip_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let settings = Settings {
            base_url: Some("https://unifi.local/proxy/network".into()),
            site_id: Some("site-1".into()),
            ..Settings::default()
        };
        save_settings(&path, &settings).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("api_key"));
        let loaded: Settings = Figment::new().merge(Toml::file(&path)).extract().unwrap();
        assert_eq!(loaded, settings);
    }
}
