//! Walking directions to an evacuation center.

use sagip_core::{Portal, WalkingRoute};

use crate::cli::{GlobalOpts, OutputFormat, RouteArgs};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(destination: &str, route: &WalkingRoute) -> String {
    let mut lines = vec![
        format!("To:        {destination}"),
        format!("Total:     {}", route.distance_label()),
        format!("Walking:   ~{} min", route.duration_minutes()),
        String::new(),
    ];
    lines.extend(
        route
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{:>2}. {}", i + 1, step.text)),
    );
    lines.join("\n")
}

pub async fn handle(portal: &Portal, args: &RouteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let from = util::coordinates(args.from, "from")?;
    let center = portal.center(&args.center).await?;

    let spinner = util::spinner(global, "Planning walking route");
    let route = portal.walking_route(from, &center).await;
    spinner.finish_and_clear();
    let route = route?;

    let out = match global.output {
        OutputFormat::Plain => route
            .steps
            .iter()
            .map(|s| s.text.clone())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => output::render_single(
            &global.output,
            &route,
            |r| detail(&center.name, r),
            WalkingRoute::distance_label,
        )?,
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
