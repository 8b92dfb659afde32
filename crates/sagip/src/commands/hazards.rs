//! Hazard and facility markers.

use std::sync::Arc;

use tabled::Tabled;

use sagip_core::filter::{hazards_matching, risk_layer};
use sagip_core::{HazardKind, HazardMarker, Portal, ToggleSet};

use crate::cli::{GlobalOpts, HazardsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct HazardRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Icon")]
    icon: String,
}

impl From<&Arc<HazardMarker>> for HazardRow {
    fn from(m: &Arc<HazardMarker>) -> Self {
        Self {
            id: m.id.to_string(),
            kind: m.kind.label(),
            location: m
                .coordinates
                .map_or_else(|| "-".into(), |at| at.to_string()),
            address: output::or_dash(m.address.as_deref()),
            icon: output::or_dash(m.kind.icon()),
        }
    }
}

/// Chip set with only the requested kinds switched on.
fn chips(kinds: &[String]) -> Result<ToggleSet<HazardKind>, CliError> {
    let mut set = ToggleSet::all(HazardKind::KNOWN);
    let mut wanted: Vec<HazardKind> = Vec::with_capacity(kinds.len());
    for raw in kinds {
        let kind = HazardKind::parse(raw);
        if let HazardKind::Other(name) = &kind {
            let known = HazardKind::KNOWN
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(CliError::Validation {
                field: "kind".into(),
                reason: format!("unknown hazard kind '{name}' (expected one of {known})"),
            });
        }
        if !wanted.contains(&kind) {
            wanted.push(kind);
        }
    }
    for kind in &wanted {
        set.toggle(kind);
    }
    Ok(set)
}

pub async fn handle(
    portal: &Portal,
    args: &HazardsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let set = chips(&args.kind)?;

    let spinner = util::spinner(global, "Loading hazard markers");
    let markers = portal.hazards_with(!args.no_backfill).await;
    spinner.finish_and_clear();

    let mut shown = hazards_matching(&markers, &set);
    if args.risk_layer {
        shown = risk_layer(&shown);
    }
    if shown.is_empty() {
        util::note(global, "No hazard markers to show");
    }

    let out = output::render_list(&global.output, &shown, |m| HazardRow::from(m), |m| m.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn no_kinds_keeps_every_chip() {
        assert!(chips(&[]).unwrap().all_active());
    }

    #[test]
    fn requested_kinds_are_isolated() {
        let set = chips(&["flood".into(), "fallen tree".into(), "Flood".into()]).unwrap();
        assert_eq!(set.active(), &[HazardKind::Flood, HazardKind::FallenTree]);
    }

    #[test]
    fn every_kind_listed_means_all_active() {
        let all: Vec<String> = HazardKind::KNOWN.iter().map(ToString::to_string).collect();
        assert!(chips(&all).unwrap().all_active());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(chips(&["tsunami".into()]).is_err());
    }
}
