//! Reverse geocoding.

use serde::Serialize;

use sagip_core::{Coordinates, Portal};

use crate::cli::{GeocodeArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct Place {
    location: Coordinates,
    name: String,
}

pub async fn handle(portal: &Portal, args: &GeocodeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let at = util::coordinates(args.at, "at")?;
    let name = if args.label {
        portal.report_location_label(at).await
    } else {
        portal.place_name(at).await
    };
    let place = Place { location: at, name };
    let out = output::render_single(&global.output, &place, |p| p.name.clone(), |p| p.name.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
