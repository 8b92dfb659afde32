// Backend HTTP client
//
// Wraps `reqwest::Client` with endpoint URL construction and response
// decoding for the municipal PHP backend. Endpoint groups (centers,
// contacts, hazards, incidents) are implemented as inherent methods in
// sibling files to keep this module focused on transport mechanics.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, body_preview};
use crate::transport::TransportConfig;

/// Endpoint paths, relative to the backend base URL.
///
/// The PHP backend grew organically, so some endpoints live under
/// `controllers/` and others under `public/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub centers: String,
    pub contacts: String,
    pub hazards: String,
    pub incidents: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            centers: "controllers/evacuationCenterController.php".into(),
            contacts: "public/barangayContact.php".into(),
            hazards: "public/disasterMapping.php".into(),
            incidents: "public/createIncident.php".into(),
        }
    }
}

/// Raw HTTP client for the municipal backend.
///
/// Every method returns decoded wire records; the caller decides how to
/// degrade on failure.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    endpoints: Endpoints,
    timeout_secs: u64,
}

impl BackendClient {
    /// Create a new backend client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root, e.g. `http://192.168.137.1/Disaster-backend/`.
    pub fn new(
        base_url: &str,
        endpoints: Endpoints,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            endpoints,
            timeout_secs: transport.timeout_secs(),
        })
    }

    /// Create a backend client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        endpoints: Endpoints,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            endpoints,
            timeout_secs: 0,
        })
    }

    /// The backend base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The configured endpoint paths.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Join an endpoint path onto the base URL.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body as `T`.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");

        let resp = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.decode(resp).await
    }

    /// Turn a reqwest timeout into our own variant so callers can tell it apart.
    pub(crate) fn map_send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Check the status code, then decode the body as `T`.
    ///
    /// Non-2xx responses become `Error::Backend` with a body preview;
    /// malformed JSON becomes `Error::Deserialization` carrying the raw body.
    pub(crate) async fn decode<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Backend {
                message: format!("HTTP {status}: {}", body_preview(&body)),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", body_preview(&body)),
            body: body.clone(),
        })
    }
}

/// Ensure the base URL ends with `/` so relative joins keep the prefix path.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = BackendClient::with_client(
            reqwest::Client::new(),
            "http://192.168.137.1/Disaster-backend",
            Endpoints::default(),
        )
        .unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "http://192.168.137.1/Disaster-backend/"
        );
    }

    #[test]
    fn endpoint_urls_keep_the_prefix() {
        let client = BackendClient::with_client(
            reqwest::Client::new(),
            "http://host/Disaster-backend/",
            Endpoints::default(),
        )
        .unwrap();
        let url = client.endpoint_url("/public/barangayContact.php").unwrap();
        assert_eq!(
            url.as_str(),
            "http://host/Disaster-backend/public/barangayContact.php"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result =
            BackendClient::with_client(reqwest::Client::new(), "not a url", Endpoints::default());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
