//! Shared helpers for command handlers.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use sagip_core::Coordinates;

use crate::cli::{GlobalOpts, LatLon};
use crate::error::CliError;

/// Validate a command-line `LAT,LON` into portal coordinates.
pub fn coordinates(at: LatLon, field: &str) -> Result<Coordinates, CliError> {
    Coordinates::new(at.lat, at.lon).ok_or_else(|| CliError::Validation {
        field: field.into(),
        reason: format!(
            "{},{} is not a usable location (out of range, or a zero coordinate)",
            at.lat, at.lon
        ),
    })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.trim_end_matches('?').into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Spinner on stderr while a request is in flight. Hidden when quiet or
/// when stderr is not a terminal.
pub fn spinner(global: &GlobalOpts, message: &'static str) -> ProgressBar {
    if global.quiet || !std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Print a status line on stderr unless quiet.
pub fn note(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_coordinates_are_rejected() {
        assert!(coordinates(LatLon { lat: 0.0, lon: 121.2 }, "at").is_err());
        assert!(coordinates(LatLon { lat: 14.17, lon: 121.24 }, "at").is_ok());
        assert!(coordinates(LatLon { lat: 91.0, lon: 121.24 }, "at").is_err());
    }
}
