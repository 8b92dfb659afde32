//! Barangay contact directory.

use std::sync::Arc;

use tabled::Tabled;

use sagip_core::{BarangayContact, Portal, barangay};

use crate::cli::{ContactsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ContactRow {
    #[tabled(rename = "Barangay")]
    barangay: String,
    #[tabled(rename = "Captain")]
    captain: String,
    #[tabled(rename = "Mobile")]
    mobile: String,
    #[tabled(rename = "Landline")]
    landline: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Facebook")]
    facebook: String,
    #[tabled(rename = "Map")]
    located: &'static str,
}

impl From<&Arc<BarangayContact>> for ContactRow {
    fn from(c: &Arc<BarangayContact>) -> Self {
        Self {
            barangay: c.display_name(),
            captain: output::or_dash(c.captain_name.as_deref()),
            mobile: output::or_dash(c.contact_number.as_deref()),
            landline: output::or_dash(c.landline.as_deref()),
            email: output::or_dash(c.email.as_deref()),
            facebook: output::or_dash(c.facebook_page.as_deref()),
            located: if c.has_location() { "yes" } else { "no" },
        }
    }
}

pub async fn handle(
    portal: &Portal,
    args: &ContactsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let contacts = portal.contacts().await;
    let selected: Vec<Arc<BarangayContact>> = contacts
        .iter()
        .filter(|c| {
            args.barangay
                .as_deref()
                .is_none_or(|wanted| barangay::same(&c.barangay_name, wanted))
        })
        .cloned()
        .collect();

    if selected.is_empty() {
        util::note(global, "No barangay contacts found");
    }

    let out = output::render_list(&global.output, &selected, |c| ContactRow::from(c), |c| {
        c.barangay_name.clone()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
