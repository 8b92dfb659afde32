//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use sagip_config::ConfigError;
use sagip_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(sagip::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Set its address with --backend or: sagip config set backend.url <URL>"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(sagip::timeout),
        help("Increase the timeout with --timeout or check the service's responsiveness.")
    )]
    Timeout { seconds: u64 },

    #[error("Rate limited; retry after {retry_after_secs}s")]
    #[diagnostic(
        code(sagip::rate_limited),
        help("Nominatim allows about one request per second. Wait and try again.")
    )]
    RateLimited { retry_after_secs: u64 },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(sagip::not_found),
        help("Run: sagip {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{what} has no usable coordinates")]
    #[diagnostic(code(sagip::missing_coordinates))]
    MissingCoordinates { what: String },

    // ── Services ─────────────────────────────────────────────────────
    #[error("Rejected by backend: {message}")]
    #[diagnostic(code(sagip::rejected))]
    Rejected { message: String },

    #[error("Walking directions unavailable: {message}")]
    #[diagnostic(
        code(sagip::routing_unavailable),
        help(
            "Walking routes need an OpenRouteService API key.\n\
             Store one with: sagip config set-key, or set ORS_API_KEY."
        )
    )]
    RoutingUnavailable { message: String },

    #[error("Location unavailable: {reason}")]
    #[diagnostic(code(sagip::location_unavailable), help("Pass a location with --at LAT,LON."))]
    LocationUnavailable { reason: String },

    #[error("API error: {message}")]
    #[diagnostic(code(sagip::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sagip::validation))]
    Validation { field: String, reason: String },

    #[error("{0}")]
    #[diagnostic(code(sagip::report_invalid))]
    ReportInvalid(String),

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(sagip::config),
        help("Inspect the file with: sagip config show")
    )]
    Config(String),

    #[error("Keyring error: {0}")]
    #[diagnostic(code(sagip::keyring))]
    Keyring(String),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(sagip::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON output failed: {0}")]
    #[diagnostic(code(sagip::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML output failed: {0}")]
    #[diagnostic(code(sagip::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::ReportInvalid(_)
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::RateLimited { retry_after_secs } => {
                CliError::RateLimited { retry_after_secs }
            }
            CoreError::CenterNotFound { identifier } => CliError::NotFound {
                resource_type: "evacuation center".into(),
                identifier,
                list_command: "centers list".into(),
            },
            CoreError::MissingCoordinates { entity, identifier } => CliError::MissingCoordinates {
                what: format!("{entity} {identifier}"),
            },
            CoreError::LocationUnavailable { reason } => CliError::LocationUnavailable { reason },
            CoreError::ValidationFailed(e) => CliError::ReportInvalid(e.to_string()),
            CoreError::Rejected { message } => CliError::Rejected { message },
            CoreError::RoutingUnavailable { message } => CliError::RoutingUnavailable { message },
            CoreError::Api { message, status } => CliError::ApiError { message, status },
            CoreError::Config { message } => CliError::Config(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Keyring(e) => CliError::Keyring(e.to_string()),
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other.to_string()),
        }
    }
}
