//! Nominatim / OpenStreetMap reverse-geocoding client.
//!
//! Used to backfill missing hazard-marker addresses and to label the
//! reporter's position on the incident form. The public instance allows
//! **1 request per second**; callers issue few enough lookups per view that
//! no client-side limiter is applied.
//!
//! See <https://nominatim.org/release-docs/develop/api/Reverse/>

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Error, body_preview};
use crate::transport::TransportConfig;

/// Default public Nominatim reverse endpoint.
pub const NOMINATIM_REVERSE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Structured address components returned by Nominatim.
///
/// Only the keys the portal reads are modelled; Philippine addresses map
/// puroks onto neighbourhood/hamlet and barangays onto village/town.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct AddressParts {
    pub road: Option<String>,
    pub neighbourhood: Option<String>,
    pub suburb: Option<String>,
    pub hamlet: Option<String>,
    pub quarter: Option<String>,
    pub village: Option<String>,
    pub town: Option<String>,
    pub city_district: Option<String>,
    pub city: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// A reverse-geocoding result.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReversePlace {
    pub display_name: Option<String>,
    pub address: Option<AddressParts>,
    /// Present (instead of an address) when Nominatim found nothing.
    #[serde(default)]
    pub error: Option<String>,
}

/// Async client for Nominatim's `/reverse` endpoint.
pub struct GeocodingClient {
    http: reqwest::Client,
    reverse_url: Url,
}

impl GeocodingClient {
    /// Build from a reverse endpoint URL and transport config.
    pub fn new(reverse_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            reverse_url: Url::parse(reverse_url)?,
        })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, reverse_url: &str) -> Result<Self, Error> {
        Ok(Self {
            http,
            reverse_url: Url::parse(reverse_url)?,
        })
    }

    /// Reverse-geocode a coordinate pair.
    ///
    /// `GET /reverse?format=jsonv2&lat={lat}&lon={lon}`
    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<ReversePlace, Error> {
        debug!(lat, lon, "GET {}", self.reverse_url);

        let resp = self
            .http
            .get(self.reverse_url.clone())
            .query(&[
                ("format", "jsonv2".to_owned()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(1);
            return Err(Error::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            return Err(Error::Geocoding {
                message: format!("HTTP {status}"),
            });
        }

        let body = resp.text().await?;
        let place: ReversePlace =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", body_preview(&body)),
                body: body.clone(),
            })?;

        match place.error {
            Some(message) => Err(Error::Geocoding { message }),
            None => Ok(place),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_jsonv2_reverse_payload() {
        let body = serde_json::json!({
            "display_name": "Rizal Street, Dayap, Calauan, Laguna, Calabarzon, 4012, Philippines",
            "address": {
                "road": "Rizal Street",
                "village": "Dayap",
                "town": "Calauan",
                "state": "Laguna",
                "country": "Philippines"
            }
        });
        let place: ReversePlace = serde_json::from_value(body).unwrap();
        let address = place.address.unwrap();
        assert_eq!(address.road.as_deref(), Some("Rizal Street"));
        assert_eq!(address.village.as_deref(), Some("Dayap"));
        assert!(address.city.is_none());
    }

    #[test]
    fn default_url_parses() {
        assert!(Url::parse(NOMINATIM_REVERSE_URL).is_ok());
    }
}
