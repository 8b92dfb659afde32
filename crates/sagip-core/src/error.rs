// ── Core error types ──
//
// User-facing errors from sagip-core. Consumers never see reqwest errors or
// JSON parse failures directly; the `From<sagip_api::Error>` impl folds
// transport-layer errors into domain-appropriate variants.

use thiserror::Error;

use crate::report::ReportValidationError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Rate limited by upstream service, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Evacuation center not found: {identifier}")]
    CenterNotFound { identifier: String },

    #[error("{entity} {identifier} has no usable coordinates")]
    MissingCoordinates {
        entity: &'static str,
        identifier: String,
    },

    #[error("Location unavailable: {reason}")]
    LocationUnavailable { reason: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error(transparent)]
    ValidationFailed(#[from] ReportValidationError),

    #[error("Rejected by backend: {message}")]
    Rejected { message: String },

    #[error("Routing unavailable: {message}")]
    RoutingUnavailable { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// `true` for failures the user can fix by simply trying again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<sagip_api::Error> for CoreError {
    fn from(err: sagip_api::Error) -> Self {
        match err {
            sagip_api::Error::Transport(ref e) if e.is_connect() => CoreError::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                reason: err.to_string(),
            },
            sagip_api::Error::Transport(ref e) if e.is_timeout() => {
                CoreError::Timeout { timeout_secs: 0 }
            }
            sagip_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            sagip_api::Error::RateLimited { retry_after_secs } => {
                CoreError::RateLimited { retry_after_secs }
            }
            sagip_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            sagip_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            sagip_api::Error::InvalidApiKey { message } => CoreError::Config { message },
            sagip_api::Error::Rejected { message } => CoreError::Rejected { message },
            sagip_api::Error::Routing { message, .. } => CoreError::RoutingUnavailable { message },
            sagip_api::Error::Backend { message, status } => CoreError::Api {
                message,
                status: Some(status),
            },
            sagip_api::Error::Geocoding { message } => CoreError::Api {
                message: format!("geocoding: {message}"),
                status: None,
            },
            sagip_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("unexpected response: {message}"),
                status: None,
            },
            sagip_api::Error::Io(e) => CoreError::Api {
                message: format!("I/O error: {e}"),
                status: None,
            },
            sagip_api::Error::Transport(e) => CoreError::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
        }
    }
}
