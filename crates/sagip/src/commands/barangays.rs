//! Static list of served barangays.

use serde::Serialize;
use tabled::Tabled;

use sagip_core::barangay::{self, BARANGAYS};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize, Tabled)]
struct BarangayRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Slug")]
    slug: &'static str,
    #[tabled(rename = "Logo")]
    logo: String,
}

fn rows() -> Vec<BarangayRow> {
    BARANGAYS
        .iter()
        .map(|&(name, slug)| BarangayRow {
            name,
            slug,
            logo: barangay::logo_file(Some(name)),
        })
        .collect()
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let rows = rows();
    let out = output::render_list(
        &global.output,
        &rows,
        |r| BarangayRow {
            name: r.name,
            slug: r.slug,
            logo: r.logo.clone(),
        },
        |r| r.slug.to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
