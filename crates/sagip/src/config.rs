//! CLI configuration: a thin wrapper around `sagip_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--backend, --timeout, --insecure).

use sagip_core::{PortalConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use sagip_config::{
    Config, config_path, load_config, load_config_or_default, resolve_ors_api_key, save_config, store_ors_api_key,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Apply global flag overrides on top of a loaded config.
///
/// Flags (and their `SAGIP_*` env vars) take priority over the file.
pub fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref url) = global.backend {
        cfg.backend.url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.backend.timeout = timeout;
    }
    if global.insecure {
        cfg.backend.insecure = true;
    }
}

/// Build a `PortalConfig` from the config file plus CLI overrides.
pub fn build_portal_config(global: &GlobalOpts) -> Result<PortalConfig, CliError> {
    let mut cfg = load_config()?;
    apply_overrides(&mut cfg, global);
    let portal = cfg.to_portal_config()?;

    if portal.tls == TlsVerification::DangerAcceptInvalid {
        tracing::debug!("TLS verification disabled");
    }
    tracing::debug!(
        backend = %portal.backend_url,
        timeout_secs = portal.timeout.as_secs(),
        routing = portal.ors_api_key.is_some(),
        "portal configuration resolved"
    );
    Ok(portal)
}
