//! CLI error types with miette diagnostics.
//!
//! Maps `unibridge_api::Error` (by kind) and `ConfigError` into user-facing
//! errors with actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use unibridge_api::{Error as ApiError, ErrorKind};
use unibridge_config::ConfigError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the controller")]
    #[diagnostic(
        code(unibridge::connection_failed),
        help(
            "Check that the controller is running and the base URL is right.\n\
             Self-signed certificate? Try --insecure (-k) or set ca_cert."
        )
    )]
    ConnectionFailed {
        #[source]
        source: ApiError,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(unibridge::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout {
        #[source]
        source: ApiError,
    },

    // ── Controller answers ───────────────────────────────────────────
    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(unibridge::auth_failed),
        help(
            "Verify the API key under Settings > Control Plane > Integrations.\n\
             Store a new one with: unibridge config set-key"
        )
    )]
    AuthFailed {
        status: u16,
        #[source]
        source: ApiError,
    },

    #[error("Not found")]
    #[diagnostic(
        code(unibridge::not_found),
        help("List the resource to see valid IDs, and check --site.")
    )]
    NotFound {
        #[source]
        source: ApiError,
    },

    #[error("The resource changed while it was being updated")]
    #[diagnostic(
        code(unibridge::conflict),
        help("Run the command again to apply the change on top of the new state.")
    )]
    Conflict {
        #[source]
        source: ApiError,
    },

    #[error("The controller rejected the request")]
    #[diagnostic(code(unibridge::rejected))]
    Rejected {
        #[source]
        source: ApiError,
    },

    #[error("Unexpected response from the controller")]
    #[diagnostic(
        code(unibridge::api_error),
        help("Re-run with -vv to log the request, or -o json on a list command to inspect data.")
    )]
    Api {
        #[source]
        source: ApiError,
    },

    #[error("Invalid argument")]
    #[diagnostic(code(unibridge::invalid_argument))]
    InvalidArgument {
        #[source]
        source: ApiError,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No API key configured for site '{site}'")]
    #[diagnostic(
        code(unibridge::no_credentials),
        help(
            "Set UNIFI_API_KEY, point api_key_env at a variable,\n\
             or store one with: unibridge config set-key"
        )
    )]
    NoCredentials { site: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(
        code(unibridge::validation),
        help("Create a config with: unibridge config init --base-url <URL> --site <ID>")
    )]
    Validation { field: String, reason: String },

    #[error("Configuration error")]
    #[diagnostic(code(unibridge::config))]
    Config {
        #[source]
        source: ConfigError,
    },

    #[error("Config file already exists at {path}")]
    #[diagnostic(code(unibridge::config_exists), help("Pass --force to overwrite it."))]
    ConfigExists { path: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(unibridge::confirmation_required),
        help("Use --yes (-y) to confirm.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(unibridge::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::InvalidArgument { .. }
            | Self::Validation { .. }
            | Self::ConfigExists { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::Api { .. } | Self::Config { .. } | Self::Io(_) | Self::Json(_) => {
                exit_code::GENERAL
            }
        }
    }
}

impl From<ApiError> for CliError {
    fn from(source: ApiError) -> Self {
        match source.kind() {
            ErrorKind::Validation => Self::InvalidArgument { source },
            ErrorKind::Transport if source.is_timeout() => Self::Timeout { source },
            ErrorKind::Transport => Self::ConnectionFailed { source },
            ErrorKind::NotFound => Self::NotFound { source },
            ErrorKind::Conflict => Self::Conflict { source },
            ErrorKind::Controller => Self::Rejected { source },
            ErrorKind::HttpStatus => match source.status() {
                Some(status @ (401 | 403)) => Self::AuthFailed { status, source },
                Some(404) => Self::NotFound { source },
                Some(409 | 412) => Self::Conflict { source },
                Some(400 | 422) => Self::Rejected { source },
                _ => Self::Api { source },
            },
            ErrorKind::Decode => Self::Api { source },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { site } => Self::NoCredentials { site },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config { source: other },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::HttpStatus {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn api_errors_map_to_distinct_exit_codes() {
        let cases = [
            (ApiError::Validation("x".into()), exit_code::USAGE),
            (http(401), exit_code::AUTH),
            (http(404), exit_code::NOT_FOUND),
            (http(412), exit_code::CONFLICT),
            (http(500), exit_code::GENERAL),
            (
                ApiError::NotFound {
                    resource: "site",
                    id: "s".into(),
                },
                exit_code::NOT_FOUND,
            ),
            (
                ApiError::Controller {
                    code: "error".into(),
                    message: "api.err.UnknownStation".into(),
                },
                exit_code::REJECTED,
            ),
            (ApiError::ResponseTooLarge { limit: 1 }, exit_code::CONNECTION),
        ];
        for (err, code) in cases {
            let label = err.to_string();
            assert_eq!(CliError::from(err).exit_code(), code, "{label}");
        }
    }

    #[test]
    fn config_validation_is_a_usage_error() {
        let err = CliError::from(ConfigError::Validation {
            field: "base_url".into(),
            reason: "a controller URL is required".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert!(err.to_string().contains("base_url"));
    }
}
