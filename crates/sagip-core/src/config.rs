// ── Runtime portal configuration ──
//
// These types describe where the portal's data comes from and how the
// views behave. They never touch disk; the CLI builds a `PortalConfig`
// (usually from sagip-config) and hands it to `Portal::new`.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use sagip_api::geocoding::NOMINATIM_REVERSE_URL;
use sagip_api::routing::ORS_BASE_URL;
use sagip_api::{Endpoints, TlsMode, TransportConfig};

use crate::address::DEFAULT_REGION_SUFFIXES;
use crate::capacity::DEFAULT_ALMOST_FULL_THRESHOLD;
use crate::filter::DEFAULT_NEAREST_RADIUS_KM;
use crate::location::DEFAULT_LOCATION_TIMEOUT;
use crate::map::MapView;
use crate::sheet::SheetConfig;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed municipal servers).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Everything a `Portal` needs to talk to its services.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Backend root, e.g. `http://192.168.137.1/Disaster-backend/`.
    pub backend_url: String,
    pub endpoints: Endpoints,
    pub nominatim_url: String,
    pub ors_url: String,
    /// Without a key, walking routes are unavailable.
    pub ors_api_key: Option<SecretString>,
    pub tls: TlsVerification,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// How long to wait for a device position fix.
    pub location_timeout: Duration,
    /// Vacancy rate at or below which a center counts as almost full.
    pub almost_full_threshold: f64,
    pub nearest_radius_km: f64,
    /// Region names stripped from reverse-geocoded hazard addresses.
    pub region_suffixes: Vec<String>,
    pub map: MapView,
    pub sheet: SheetConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost/Disaster-backend/".into(),
            endpoints: Endpoints::default(),
            nominatim_url: NOMINATIM_REVERSE_URL.into(),
            ors_url: ORS_BASE_URL.into(),
            ors_api_key: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            location_timeout: DEFAULT_LOCATION_TIMEOUT,
            almost_full_threshold: DEFAULT_ALMOST_FULL_THRESHOLD,
            nearest_radius_km: DEFAULT_NEAREST_RADIUS_KM,
            region_suffixes: DEFAULT_REGION_SUFFIXES
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            map: MapView::default(),
            sheet: SheetConfig::default(),
        }
    }
}

impl PortalConfig {
    /// Shared HTTP settings for every client the portal builds.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::from(&self.tls),
            ..TransportConfig::default()
        }
        .with_timeout(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_portal_behaviour() {
        let cfg = PortalConfig::default();
        assert_eq!(cfg.location_timeout, Duration::from_secs(10));
        assert!((cfg.almost_full_threshold - 0.5).abs() < f64::EPSILON);
        assert!((cfg.nearest_radius_km - 2.0).abs() < f64::EPSILON);
        assert_eq!(cfg.region_suffixes, ["Laguna", "Calabarzon", "Philippines"]);
        assert!(cfg.ors_api_key.is_none());
    }

    #[test]
    fn transport_carries_timeout_and_tls() {
        let cfg = PortalConfig {
            timeout: Duration::from_secs(5),
            tls: TlsVerification::DangerAcceptInvalid,
            ..PortalConfig::default()
        };
        let transport = cfg.transport();
        assert_eq!(transport.timeout_secs(), 5);
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
    }
}
