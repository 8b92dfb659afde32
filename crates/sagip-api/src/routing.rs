// Hand-crafted async client for OpenRouteService walking directions.
//
// Endpoint: POST /v2/directions/foot-walking/geojson
// Auth: raw API key in the `Authorization` header

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Error, body_preview};
use crate::transport::TransportConfig;

/// Default public OpenRouteService API root.
pub const ORS_BASE_URL: &str = "https://api.openrouteservice.org/";

const WALKING_PATH: &str = "v2/directions/foot-walking/geojson";

// ── Request ──────────────────────────────────────────────────────────

/// Body for the directions endpoint. Coordinates are `[lon, lat]`.
#[derive(Debug, Clone, Serialize)]
pub struct DirectionsRequest {
    pub coordinates: Vec<[f64; 2]>,
    pub preference: &'static str,
    pub instructions: bool,
}

impl DirectionsRequest {
    /// Shortest walking route between two `(lat, lon)` points.
    pub fn walking(from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            coordinates: vec![[from.1, from.0], [to.1, to.0]],
            preference: "shortest",
            instructions: true,
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteFeature {
    pub geometry: RouteGeometry,
    pub properties: RouteProperties,
}

/// GeoJSON LineString; each coordinate is `[lon, lat]`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteGeometry {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteProperties {
    #[serde(default)]
    pub segments: Vec<RouteSegment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteSegment {
    /// Metres.
    #[serde(default)]
    pub distance: f64,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteStep {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// ORS error bodies come as `{"error": "..."}` or `{"error": {"code", "message"}}`.
#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Text(String),
    Structured {
        #[serde(default)]
        message: Option<String>,
    },
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for OpenRouteService.
pub struct RoutingClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RoutingClient {
    /// Build from an API key and transport config.
    ///
    /// Injects `Authorization: <key>` as a default header on every request.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::InvalidApiKey {
                message: format!("invalid API key header value: {e}"),
            })?;
        key_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, key_value);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Request a walking route between two `(lat, lon)` points.
    ///
    /// Returns the first route feature; an empty `features` array is an error.
    pub async fn walking_route(
        &self,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Result<RouteFeature, Error> {
        let url = self.base_url.join(WALKING_PATH)?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(&DirectionsRequest::walking(from, to))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| match e.error {
                    ErrorDetail::Text(msg) => Some(msg),
                    ErrorDetail::Structured { message } => message,
                })
                .unwrap_or_else(|| format!("HTTP {status}: {}", body_preview(&body)));
            return Err(Error::Routing {
                message,
                status: Some(status.as_u16()),
            });
        }

        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", body_preview(&body)),
                body: body.clone(),
            })?;

        parsed.features.into_iter().next().ok_or_else(|| Error::Routing {
            message: "no route found".into(),
            status: None,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
