use thiserror::Error;

/// Top-level error type for the `sagip-api` crate.
///
/// Covers every failure mode across the three upstreams: the municipal
/// backend, the Nominatim reverse geocoder, and OpenRouteService.
/// `sagip-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Upstream asked us to slow down. Includes retry-after in seconds.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// API key could not be encoded as a header value.
    #[error("Invalid API key: {message}")]
    InvalidApiKey { message: String },

    // ── Backend ─────────────────────────────────────────────────────
    /// Non-2xx response from the municipal backend.
    #[error("Backend error (HTTP {status}): {message}")]
    Backend { message: String, status: u16 },

    /// The backend answered `{"success": false}`.
    #[error("Backend rejected the request: {message}")]
    Rejected { message: String },

    // ── Mapping services ────────────────────────────────────────────
    /// Reverse geocoding failed.
    #[error("Geocoding error: {message}")]
    Geocoding { message: String },

    /// Route request failed or returned no route.
    #[error("Routing error: {message}")]
    Routing {
        message: String,
        status: Option<u16>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Reading a local file (e.g. an incident photo) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying by hand.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } | Self::RateLimited { .. } => true,
            Self::Backend { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Backend { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Backend { status, .. } => Some(*status),
            Self::Routing { status, .. } => *status,
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

/// Trim a response body to a short preview for error messages.
pub(crate) fn body_preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Backend {
            message: "boom".into(),
            status: 503,
        };
        assert!(err.is_transient());
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn client_errors_are_not_transient() {
        let err = Error::Backend {
            message: "missing".into(),
            status: 404,
        };
        assert!(!err.is_transient());
        assert!(err.is_not_found());
    }

    #[test]
    fn body_preview_respects_char_boundaries() {
        let body = "é".repeat(150);
        let preview = body_preview(&body);
        assert!(preview.len() <= 200);
        assert!(preview.chars().all(|c| c == 'é'));
    }
}
