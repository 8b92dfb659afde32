//! Config subcommand handlers.

use std::str::FromStr;

use dialoguer::{Input, Password, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of the config with secrets masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    if cfg.services.ors_api_key.is_some() {
        cfg.services.ors_api_key = Some("****".into());
    }
    cfg
}

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    let b = &cfg.backend;
    let _ = writeln!(out, "[backend]");
    let _ = writeln!(out, "url = \"{}\"", b.url);
    let _ = writeln!(out, "centers_path = \"{}\"", b.centers_path);
    let _ = writeln!(out, "contacts_path = \"{}\"", b.contacts_path);
    let _ = writeln!(out, "hazards_path = \"{}\"", b.hazards_path);
    let _ = writeln!(out, "incidents_path = \"{}\"", b.incidents_path);
    let _ = writeln!(out, "insecure = {}", b.insecure);
    if let Some(ref ca) = b.ca_cert {
        let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
    }
    let _ = writeln!(out, "timeout = {}", b.timeout);

    let s = &cfg.services;
    let _ = writeln!(out);
    let _ = writeln!(out, "[services]");
    let _ = writeln!(out, "nominatim_url = \"{}\"", s.nominatim_url);
    let _ = writeln!(out, "ors_url = \"{}\"", s.ors_url);
    if s.ors_api_key.is_some() {
        let _ = writeln!(out, "ors_api_key = \"****\"");
    }
    if let Some(ref env) = s.ors_api_key_env {
        let _ = writeln!(out, "ors_api_key_env = \"{env}\"");
    }
    let _ = writeln!(out, "location_timeout = {}", s.location_timeout);

    let d = &cfg.display;
    let _ = writeln!(out);
    let _ = writeln!(out, "[display]");
    let _ = writeln!(out, "almost_full_threshold = {}", d.almost_full_threshold);
    let _ = writeln!(out, "nearest_radius_km = {}", d.nearest_radius_km);
    let _ = writeln!(out, "region_suffixes = {:?}", d.region_suffixes);

    let sh = &cfg.sheet;
    let _ = writeln!(out);
    let _ = writeln!(out, "[sheet]");
    let _ = writeln!(out, "collapsed_mobile = {}", sh.collapsed_mobile);
    let _ = writeln!(out, "collapsed_desktop = {}", sh.collapsed_desktop);
    let _ = writeln!(out, "mid = {}", sh.mid);
    let _ = writeln!(out, "full = {}", sh.full);
    let _ = writeln!(out, "desktop_min_width = {}", sh.desktop_min_width);
    let _ = write!(out, "transition_ms = {}", sh.transition_ms);

    out
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn parse<T: FromStr>(key: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value.trim().parse().map_err(|_| CliError::Validation {
        field: key.into(),
        reason: format!("must be {expected}"),
    })
}

const SETTABLE_KEYS: &[&str] = &[
    "backend.url",
    "backend.centers_path",
    "backend.contacts_path",
    "backend.hazards_path",
    "backend.incidents_path",
    "backend.insecure",
    "backend.ca_cert",
    "backend.timeout",
    "services.nominatim_url",
    "services.ors_url",
    "services.ors_api_key",
    "services.ors_api_key_env",
    "services.location_timeout",
    "display.almost_full_threshold",
    "display.nearest_radius_km",
    "display.region_suffixes",
    "sheet.collapsed_mobile",
    "sheet.collapsed_desktop",
    "sheet.mid",
    "sheet.full",
    "sheet.desktop_min_width",
    "sheet.transition_ms",
];

/// Apply one `key = value` assignment. The result is validated by
/// translating it to a portal config before it is saved.
fn set_value(cfg: &mut Config, key: &str, value: String) -> Result<(), CliError> {
    let normalized = key.replace('-', "_");
    match normalized.as_str() {
        "backend.url" => cfg.backend.url = value,
        "backend.centers_path" => cfg.backend.centers_path = value,
        "backend.contacts_path" => cfg.backend.contacts_path = value,
        "backend.hazards_path" => cfg.backend.hazards_path = value,
        "backend.incidents_path" => cfg.backend.incidents_path = value,
        "backend.insecure" => cfg.backend.insecure = parse(key, &value, "'true' or 'false'")?,
        "backend.ca_cert" => cfg.backend.ca_cert = Some(value.into()),
        "backend.timeout" => cfg.backend.timeout = parse(key, &value, "a number (seconds)")?,
        "services.nominatim_url" => cfg.services.nominatim_url = value,
        "services.ors_url" => cfg.services.ors_url = value,
        "services.ors_api_key" => cfg.services.ors_api_key = Some(value),
        "services.ors_api_key_env" => cfg.services.ors_api_key_env = Some(value),
        "services.location_timeout" => {
            cfg.services.location_timeout = parse(key, &value, "a number (seconds)")?;
        }
        "display.almost_full_threshold" => {
            cfg.display.almost_full_threshold = parse(key, &value, "a number between 0 and 1")?;
        }
        "display.nearest_radius_km" => {
            cfg.display.nearest_radius_km = parse(key, &value, "a distance in km")?;
        }
        "display.region_suffixes" => {
            cfg.display.region_suffixes = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect();
        }
        "sheet.collapsed_mobile" => cfg.sheet.collapsed_mobile = parse(key, &value, "a fraction")?,
        "sheet.collapsed_desktop" => cfg.sheet.collapsed_desktop = parse(key, &value, "a fraction")?,
        "sheet.mid" => cfg.sheet.mid = parse(key, &value, "a fraction")?,
        "sheet.full" => cfg.sheet.full = parse(key, &value, "a fraction")?,
        "sheet.desktop_min_width" => {
            cfg.sheet.desktop_min_width = parse(key, &value, "a width in px")?;
        }
        "sheet.transition_ms" => {
            cfg.sheet.transition_ms = parse(key, &value, "a number (milliseconds)")?;
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: {}",
                    SETTABLE_KEYS.join(", ")
                ),
            });
        }
    }
    cfg.to_portal_config_with_key(None)?;
    Ok(())
}

/// Store the key in the keyring, or hand it back for the config file.
fn prompt_key_storage(key: String) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the OpenRouteService key?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        config::store_ors_api_key(&key)?;
        eprintln!("   ✓ API key stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(key))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            let mut cfg = config::load_config_or_default();
            eprintln!("Sagip configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let url: String = Input::new()
                .with_prompt("Backend URL")
                .default(cfg.backend.url.clone())
                .interact_text()
                .map_err(prompt_err)?;
            set_value(&mut cfg, "backend.url", url)?;

            let key = Password::new()
                .with_prompt("OpenRouteService API key (leave empty to skip)")
                .allow_empty_password(true)
                .interact()
                .map_err(prompt_err)?;
            if !key.trim().is_empty() {
                cfg.services.ors_api_key = prompt_key_storage(key.trim().to_owned())?;
            }

            config::save_config(&cfg)?;
            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("\n  Test it: sagip centers list");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config()?);
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                "config".into()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config()?;
            set_value(&mut cfg, &key, value)?;
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {key}");
            }
            Ok(())
        }

        // ── SetKey ──────────────────────────────────────────────────
        ConfigCommand::SetKey { key } => {
            let key = match key {
                Some(key) => key,
                None => Password::new()
                    .with_prompt("OpenRouteService API key")
                    .interact()
                    .map_err(prompt_err)?,
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(CliError::Validation {
                    field: "key".into(),
                    reason: "API key cannot be empty".into(),
                });
            }
            config::store_ors_api_key(key)?;
            if !global.quiet {
                eprintln!("✓ OpenRouteService key stored in system keyring");
            }
            Ok(())
        }
    }
}
