//! Shared configuration for the Sagip CLI.
//!
//! TOML config file, `SAGIP_*` environment overlay, OpenRouteService key
//! resolution (env var, keyring, plaintext), and translation to
//! `sagip_core::PortalConfig`. The CLI layers its `GlobalOpts` on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sagip_api::Endpoints;
use sagip_core::{MapView, PortalConfig, SheetConfig, TlsVerification};

/// Keyring service name for stored secrets.
pub const KEYRING_SERVICE: &str = "sagip";

/// Keyring entry holding the OpenRouteService key.
pub const ORS_KEYRING_ENTRY: &str = "ors/api-key";

/// Env var consulted for the OpenRouteService key unless overridden.
pub const DEFAULT_ORS_KEY_ENV: &str = "ORS_API_KEY";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

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

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendSection,

    #[serde(default)]
    pub services: ServicesSection,

    #[serde(default)]
    pub display: DisplaySection,

    /// Bottom-sheet detent fractions.
    #[serde(default)]
    pub sheet: SheetConfig,
}

/// Where the municipal backend lives.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendSection {
    /// Backend root URL.
    pub url: String,

    pub centers_path: String,
    pub contacts_path: String,
    pub hazards_path: String,
    pub incidents_path: String,

    /// Accept self-signed certificates.
    pub insecure: bool,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for BackendSection {
    fn default() -> Self {
        let portal = PortalConfig::default();
        let endpoints = Endpoints::default();
        Self {
            url: portal.backend_url,
            centers_path: endpoints.centers,
            contacts_path: endpoints.contacts,
            hazards_path: endpoints.hazards,
            incidents_path: endpoints.incidents,
            insecure: false,
            ca_cert: None,
            timeout: portal.timeout.as_secs(),
        }
    }
}

/// Public mapping services.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServicesSection {
    /// Nominatim `/reverse` endpoint.
    pub nominatim_url: String,

    /// OpenRouteService base URL.
    pub ors_url: String,

    /// OpenRouteService key (plaintext; prefer keyring or env var).
    pub ors_api_key: Option<String>,

    /// Environment variable name containing the OpenRouteService key.
    pub ors_api_key_env: Option<String>,

    /// Seconds to wait for a device position fix.
    pub location_timeout: u64,
}

impl Default for ServicesSection {
    fn default() -> Self {
        let portal = PortalConfig::default();
        Self {
            nominatim_url: portal.nominatim_url,
            ors_url: portal.ors_url,
            ors_api_key: None,
            ors_api_key_env: Some(DEFAULT_ORS_KEY_ENV.into()),
            location_timeout: portal.location_timeout.as_secs(),
        }
    }
}

/// View behaviour: classification, screening, and map framing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Vacancy rate at or below which a center is almost full.
    pub almost_full_threshold: f64,

    /// Radius of the "nearest centers" screen.
    pub nearest_radius_km: f64,

    /// Region names stripped from reverse-geocoded addresses.
    pub region_suffixes: Vec<String>,

    pub map: MapView,
}

impl Default for DisplaySection {
    fn default() -> Self {
        let portal = PortalConfig::default();
        Self {
            almost_full_threshold: portal.almost_full_threshold,
            nearest_radius_km: portal.nearest_radius_km,
            region_suffixes: portal.region_suffixes,
            map: portal.map,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("ph", "sagip", "sagip").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("sagip");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    // Nested keys use a double underscore: SAGIP_BACKEND__URL, SAGIP_SHEET__MID.
    // Single-segment vars (e.g. the CLI's SAGIP_BACKEND) are left to clap.
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(
            Env::prefixed("SAGIP_")
                .filter(|key| key.as_str().contains("__"))
                .split("__"),
        )
}

/// Load the full Config from a specific file + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(figment_for(path).extract()?)
}

/// Load the full Config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config, returning a default if it is missing or unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

// ── API key resolution ──────────────────────────────────────────────

/// Resolve the OpenRouteService key: env var, then keyring, then the
/// plaintext value in the config. `None` disables walking routes.
pub fn resolve_ors_api_key(services: &ServicesSection) -> Option<SecretString> {
    resolve_ors_api_key_with(
        services,
        |name| std::env::var(name).ok(),
        || {
            keyring::Entry::new(KEYRING_SERVICE, ORS_KEYRING_ENTRY)
                .and_then(|entry| entry.get_password())
                .ok()
        },
    )
}

fn resolve_ors_api_key_with(
    services: &ServicesSection,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl FnOnce() -> Option<String>,
) -> Option<SecretString> {
    // 1. Named env var
    if let Some(val) = services
        .ors_api_key_env
        .as_deref()
        .and_then(|name| env(name))
        .filter(|v| !v.trim().is_empty())
    {
        return Some(SecretString::from(val));
    }

    // 2. System keyring
    if let Some(secret) = keyring() {
        return Some(SecretString::from(secret));
    }

    // 3. Plaintext in config
    services
        .ors_api_key
        .as_ref()
        .filter(|k| !k.trim().is_empty())
        .map(|k| SecretString::from(k.clone()))
}

/// Store the OpenRouteService key in the system keyring.
pub fn store_ors_api_key(key: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, ORS_KEYRING_ENTRY)?;
    entry.set_password(key)?;
    Ok(())
}

// ── Translation to PortalConfig ─────────────────────────────────────

fn validate_url(field: &str, raw: &str) -> Result<String, ConfigError> {
    url::Url::parse(raw).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;
    Ok(raw.to_owned())
}

impl Config {
    /// Build a `PortalConfig`, resolving the OpenRouteService key through
    /// the normal chain.
    pub fn to_portal_config(&self) -> Result<PortalConfig, ConfigError> {
        self.to_portal_config_with_key(resolve_ors_api_key(&self.services))
    }

    /// Build a `PortalConfig` with an already-resolved key.
    pub fn to_portal_config_with_key(
        &self,
        ors_api_key: Option<SecretString>,
    ) -> Result<PortalConfig, ConfigError> {
        let threshold = self.display.almost_full_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Validation {
                field: "display.almost_full_threshold".into(),
                reason: format!("expected a fraction between 0 and 1, got {threshold}"),
            });
        }
        let radius = self.display.nearest_radius_km;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::Validation {
                field: "display.nearest_radius_km".into(),
                reason: format!("expected a positive distance, got {radius}"),
            });
        }
        self.sheet.validate().map_err(|e| ConfigError::Validation {
            field: format!("sheet.{}", e.field),
            reason: e.reason,
        })?;

        let tls = if self.backend.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.backend.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        };

        Ok(PortalConfig {
            backend_url: validate_url("backend.url", &self.backend.url)?,
            endpoints: Endpoints {
                centers: self.backend.centers_path.clone(),
                contacts: self.backend.contacts_path.clone(),
                hazards: self.backend.hazards_path.clone(),
                incidents: self.backend.incidents_path.clone(),
            },
            nominatim_url: validate_url("services.nominatim_url", &self.services.nominatim_url)?,
            ors_url: validate_url("services.ors_url", &self.services.ors_url)?,
            ors_api_key,
            tls,
            timeout: Duration::from_secs(self.backend.timeout),
            location_timeout: Duration::from_secs(self.services.location_timeout),
            almost_full_threshold: threshold,
            nearest_radius_km: radius,
            region_suffixes: self.display.region_suffixes.clone(),
            map: self.display.map.clone(),
            sheet: self.sheet.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.backend.timeout, 30);
        assert_eq!(cfg.display.region_suffixes.len(), 3);
        assert_eq!(cfg.services.location_timeout, 10);
    }

    #[test]
    fn save_then_load_preserves_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.backend.url = "http://192.168.137.1/Disaster-backend/".into();
        cfg.display.almost_full_threshold = 0.3;
        cfg.sheet.mid = 0.6;
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.backend.url, "http://192.168.137.1/Disaster-backend/");
        assert!((loaded.display.almost_full_threshold - 0.3).abs() < f64::EPSILON);
        assert!((loaded.sheet.mid - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_file_and_env_overlay() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [backend]
                url = "http://10.0.0.5/Disaster-backend/"

                [display]
                nearest_radius_km = 5.0
                "#,
            )?;
            jail.set_env("SAGIP_BACKEND__TIMEOUT", "12");
            jail.set_env("SAGIP_BACKEND", "ignored-by-config");

            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.backend.url, "http://10.0.0.5/Disaster-backend/");
            assert_eq!(cfg.backend.timeout, 12);
            assert_eq!(cfg.backend.centers_path, Endpoints::default().centers);
            assert!((cfg.display.nearest_radius_km - 5.0).abs() < f64::EPSILON);
            Ok(())
        });
    }

    #[test]
    fn key_chain_prefers_env_then_keyring_then_plaintext() {
        let mut services = ServicesSection {
            ors_api_key: Some("plain".into()),
            ..ServicesSection::default()
        };

        let key = resolve_ors_api_key_with(
            &services,
            |name| (name == DEFAULT_ORS_KEY_ENV).then(|| "from-env".to_owned()),
            || Some("from-keyring".into()),
        );
        assert_eq!(key.unwrap().expose_secret(), "from-env");

        let key = resolve_ors_api_key_with(&services, |_| None, || Some("from-keyring".into()));
        assert_eq!(key.unwrap().expose_secret(), "from-keyring");

        let key = resolve_ors_api_key_with(&services, |_| None, || None);
        assert_eq!(key.unwrap().expose_secret(), "plain");

        services.ors_api_key = None;
        assert!(resolve_ors_api_key_with(&services, |_| None, || None).is_none());
    }

    #[test]
    fn portal_config_translation() {
        let mut cfg = Config::default();
        cfg.backend.insecure = true;
        cfg.backend.timeout = 7;
        let portal = cfg.to_portal_config_with_key(None).unwrap();
        assert_eq!(portal.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(portal.timeout, Duration::from_secs(7));
        assert_eq!(portal.location_timeout, Duration::from_secs(10));
        assert_eq!(portal.endpoints, Endpoints::default());
    }

    #[test]
    fn rejects_bad_values() {
        let mut cfg = Config::default();
        cfg.backend.url = "not a url".into();
        let err = cfg.to_portal_config_with_key(None).unwrap_err();
        assert!(err.to_string().starts_with("invalid backend.url"));

        let mut cfg = Config::default();
        cfg.display.almost_full_threshold = 1.5;
        assert!(cfg.to_portal_config_with_key(None).is_err());
    }

    #[test]
    fn rejects_disordered_sheet_detents() {
        let mut cfg = Config::default();
        cfg.sheet.collapsed_mobile = 0.9;
        cfg.sheet.full = 0.17;
        let err = cfg.to_portal_config_with_key(None).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "sheet.collapsed_mobile"),
            "got {err:?}"
        );

        let mut cfg = Config::default();
        cfg.sheet.mid = f64::NAN;
        let err = cfg.to_portal_config_with_key(None).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "sheet.mid"),
            "got {err:?}"
        );
    }
}
