//! Incident report submission.

use serde::Serialize;

use sagip_api::MediaUpload;
use sagip_core::{Coordinates, CoreError, IncidentDraft, IncidentReport, Portal, Severity};

use crate::cli::{GlobalOpts, ReportArgs, SeverityArg};
use crate::error::CliError;
use crate::output;

use super::util;

fn severity(arg: SeverityArg) -> Severity {
    match arg {
        SeverityArg::Critical => Severity::Critical,
        SeverityArg::Moderate => Severity::Moderate,
        SeverityArg::Minor => Severity::Minor,
    }
}

/// What was (or would be) sent.
#[derive(Serialize)]
struct ReportSummary {
    reporter_name: String,
    reporter_contact: String,
    description: String,
    severity: Severity,
    location: Coordinates,
    location_label: Option<String>,
    photo: String,
    photo_bytes: usize,
    submitted: bool,
}

impl ReportSummary {
    fn new(report: &IncidentReport, location_label: Option<String>, submitted: bool) -> Self {
        Self {
            reporter_name: report.reporter_name.clone(),
            reporter_contact: report.reporter_contact.as_str().to_owned(),
            description: report.description.clone(),
            severity: report.severity,
            location: report.location,
            location_label,
            photo: report.photo.file_name.clone(),
            photo_bytes: report.photo.bytes.len(),
            submitted,
        }
    }
}

fn detail(s: &ReportSummary) -> String {
    [
        format!("Reporter:  {} ({})", s.reporter_name, s.reporter_contact),
        format!("Severity:  {}", s.severity),
        format!("Location:  {}", s.location),
        format!("Near:      {}", output::or_dash(s.location_label.as_deref())),
        format!("Photo:     {} ({} bytes)", s.photo, s.photo_bytes),
        format!("Details:   {}", s.description),
        format!(
            "Status:    {}",
            if s.submitted { "submitted" } else { "valid, not sent" }
        ),
    ]
    .join("\n")
}

async fn draft(args: ReportArgs) -> Result<IncidentDraft, CliError> {
    let location = args.at.map(|at| util::coordinates(at, "at")).transpose()?;
    let photo = match &args.photo {
        Some(path) => Some(MediaUpload::from_path(path).await.map_err(CoreError::from)?),
        None => None,
    };
    Ok(IncidentDraft {
        reporter_name: args.name,
        reporter_contact: args.phone,
        description: args.description,
        severity: args.severity.map(severity),
        location,
        photo,
    })
}

pub async fn handle(portal: &Portal, args: ReportArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let dry_run = args.dry_run;
    let draft = draft(args).await?;
    let report = draft
        .clone()
        .validate()
        .map_err(|e| CliError::ReportInvalid(e.to_string()))?;

    if dry_run {
        let summary = ReportSummary::new(&report, None, false);
        let out = output::render_single(&global.output, &summary, detail, |s| s.reporter_contact.clone())?;
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let label = portal.report_location_label(report.location).await;
    if !util::confirm(&format!("Send {} report near {label}?", report.severity), global.yes)? {
        util::note(global, "Report not sent");
        return Ok(());
    }

    let spinner = util::spinner(global, "Sending report");
    let sent = portal.submit_report(draft).await;
    spinner.finish_and_clear();
    sent?;

    util::note(global, "Report submitted. Thank you.");
    let summary = ReportSummary::new(&report, Some(label), true);
    let out = output::render_single(&global.output, &summary, detail, |s| s.reporter_contact.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
