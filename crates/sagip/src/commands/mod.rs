//! Command dispatch: bridges CLI args -> `Portal` calls -> output formatting.

pub mod barangays;
pub mod centers;
pub mod config_cmd;
pub mod contacts;
pub mod geocode;
pub mod hazards;
pub mod report;
pub mod route;
pub mod sheet;
pub mod util;

use sagip_core::Portal;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, portal: &Portal, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Centers(args) => centers::handle(portal, args, global).await,
        Command::Contacts(args) => contacts::handle(portal, &args, global).await,
        Command::Hazards(args) => hazards::handle(portal, &args, global).await,
        Command::Report(args) => report::handle(portal, args, global).await,
        Command::Route(args) => route::handle(portal, &args, global).await,
        Command::Geocode(args) => geocode::handle(portal, &args, global).await,
        // Offline commands are handled before dispatch
        Command::Barangays | Command::Sheet(_) | Command::Config(_) | Command::Completions(_) => {
            Err(CliError::Validation {
                field: "command".into(),
                reason: "this command does not use the portal".into(),
            })
        }
    }
}
