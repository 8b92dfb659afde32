//! Evacuation center command handlers.

use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;

use sagip_core::{
    CapacityStatus, CenterFilter, CenterView, DistanceMetric, EvacuationCenter, Occupancy, Portal,
};

use crate::cli::{CenterListArgs, CentersArgs, CentersCommand, GlobalOpts, MetricArg, StatusArg};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CenterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Barangay")]
    barangay: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Evacuees")]
    evacuees: String,
    #[tabled(rename = "Vacancy")]
    vacancy: u32,
    #[tabled(rename = "Distance")]
    distance: String,
}

fn row(view: &CenterView, color: bool) -> CenterRow {
    let c = &view.center;
    CenterRow {
        id: c.id.to_string(),
        name: c.name.clone(),
        barangay: output::or_dash(c.barangay()),
        status: output::status_label(view.occupancy.status, color),
        evacuees: occupancy_label(c, &view.occupancy),
        vacancy: view.occupancy.vacancy,
        distance: view
            .distance_km
            .map_or_else(|| "-".into(), |d| format!("{d:.2} km")),
    }
}

fn occupancy_label(c: &EvacuationCenter, o: &Occupancy) -> String {
    if c.capacity == 0 {
        format!("{} / ?", c.current_evacuees)
    } else {
        format!("{} / {} ({})", c.current_evacuees, c.capacity, o.percent_label())
    }
}

/// Center plus its classification, for `centers get`.
#[derive(Serialize)]
struct CenterDetail {
    #[serde(flatten)]
    center: Arc<EvacuationCenter>,
    barangay: Option<String>,
    logo: String,
    occupancy: Occupancy,
}

fn detail(d: &CenterDetail) -> String {
    let c = &d.center;
    [
        format!("ID:        {}", c.id),
        format!("Name:      {}", c.name),
        format!("Address:   {}", if c.location.is_empty() { "-" } else { &c.location }),
        format!("Barangay:  {}", output::or_dash(d.barangay.as_deref())),
        format!("Status:    {}", d.occupancy.status),
        format!("Evacuees:  {}", occupancy_label(c, &d.occupancy)),
        format!("Vacancy:   {}", d.occupancy.vacancy),
        format!("Contact:   {}", output::or_dash(c.contact_person.as_deref())),
        format!("Phone:     {}", output::or_dash(c.contact_number.as_deref())),
        format!(
            "Map pin:   {}",
            c.coordinates.map_or_else(|| "-".into(), |at| at.to_string())
        ),
        format!("Logo:      {}", d.logo),
    ]
    .join("\n")
}

// ── Arg translation ─────────────────────────────────────────────────

fn status(arg: StatusArg) -> CapacityStatus {
    match arg {
        StatusArg::NoData => CapacityStatus::NoData,
        StatusArg::Full => CapacityStatus::Full,
        StatusArg::AlmostFull => CapacityStatus::AlmostFull,
        StatusArg::Plenty => CapacityStatus::PlentyOfSpace,
    }
}

fn metric(arg: MetricArg) -> DistanceMetric {
    match arg {
        MetricArg::Haversine => DistanceMetric::Haversine,
        MetricArg::Planar => DistanceMetric::Planar,
    }
}

fn build_filter(args: &CenterListArgs) -> Result<CenterFilter, CliError> {
    let mut filter = CenterFilter {
        search: args.search.clone(),
        barangay: args.barangay.clone(),
        statuses: args.status.iter().copied().map(status).collect(),
        sort_by_distance: args.sort_distance,
        ..CenterFilter::default()
    };
    if let Some(near) = args.near {
        let origin = util::coordinates(near, "near")?;
        filter = match args.radius {
            Some(radius) => filter.nearest(origin, positive_radius(radius)?, metric(args.metric)),
            None => filter.origin(origin),
        };
    }
    Ok(filter)
}

fn positive_radius(radius: f64) -> Result<f64, CliError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(CliError::Validation {
            field: "radius".into(),
            reason: format!("expected a positive distance, got {radius}"),
        })
    }
}

fn render_views(views: &[CenterView], global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        views,
        |v| row(v, color),
        |v| v.center.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    portal: &Portal,
    args: CentersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CentersCommand::List(list) => {
            let filter = build_filter(&list)?;
            let centers = portal.centers().await;
            if centers.is_empty() {
                util::note(global, "No evacuation centers available");
            }
            render_views(&portal.filtered_centers(&filter), global)
        }

        CentersCommand::Get { id } => {
            let center = portal.center(&id).await?;
            let d = CenterDetail {
                barangay: center.barangay().map(str::to_owned),
                logo: center.logo_file(),
                occupancy: center.occupancy(portal.classifier()),
                center,
            };
            let out = output::render_single(&global.output, &d, detail, |d| d.center.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CentersCommand::Nearest { at, radius } => {
            let origin = util::coordinates(at, "at")?;
            portal.centers().await;
            let views = match radius {
                Some(r) => portal.filtered_centers(
                    &CenterFilter::default()
                        .nearest(origin, positive_radius(r)?, DistanceMetric::Planar)
                        .sorted_by_distance(),
                ),
                None => portal.nearest_centers(origin),
            };
            if views.is_empty() {
                util::note(global, "No evacuation centers within range");
            }
            render_views(&views, global)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::LatLon;

    fn list_args() -> CenterListArgs {
        CenterListArgs {
            search: None,
            barangay: None,
            status: vec![StatusArg::Full, StatusArg::Plenty],
            near: None,
            radius: None,
            metric: MetricArg::Planar,
            sort_distance: false,
        }
    }

    #[test]
    fn filter_translates_statuses() {
        let filter = build_filter(&list_args()).unwrap();
        assert_eq!(
            filter.statuses,
            vec![CapacityStatus::Full, CapacityStatus::PlentyOfSpace]
        );
        assert!(filter.origin.is_none());
    }

    #[test]
    fn radius_needs_positive_value() {
        let mut args = list_args();
        args.near = Some(LatLon {
            lat: 14.17,
            lon: 121.24,
        });
        args.radius = Some(-1.0);
        assert!(build_filter(&args).is_err());

        args.radius = Some(2.0);
        let filter = build_filter(&args).unwrap();
        assert!(filter.nearest_within_km.is_some_and(|r| (r - 2.0).abs() < f64::EPSILON));
        assert_eq!(filter.screening, DistanceMetric::Planar);
    }
}
