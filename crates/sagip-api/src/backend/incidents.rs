// Incident report submission
//
// `createIncident.php` takes a multipart form and answers
// `{ "success": bool, "error"?: string }`. Submissions are one-shot: there
// is no id in the response and nothing to reconcile afterwards.

use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::backend::client::BackendClient;
use crate::backend::models::{Ack, IncidentSubmission};
use crate::error::Error;

impl BackendClient {
    /// Submit an incident report with its photo.
    ///
    /// `POST {incidents}` (multipart: reporter_name, reporter_contact,
    /// description, severity, lat, lng, media)
    pub async fn submit_incident(&self, report: IncidentSubmission) -> Result<(), Error> {
        let url = self.endpoint_url(&self.endpoints().incidents)?;
        debug!("POST {url}");

        let form = build_form(report)?;
        let resp = self
            .http()
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let ack: Ack = self.decode(resp).await?;
        if ack.success {
            info!("incident report accepted");
            Ok(())
        } else {
            Err(Error::Rejected {
                message: ack.reason().unwrap_or("Failed to send report.").to_owned(),
            })
        }
    }
}

fn build_form(report: IncidentSubmission) -> Result<Form, Error> {
    let media = Part::bytes(report.media.bytes)
        .file_name(report.media.file_name)
        .mime_str(&report.media.mime_type)?;

    Ok(Form::new()
        .text("reporter_name", report.reporter_name)
        .text("reporter_contact", report.reporter_contact)
        .text("description", report.description)
        .text("severity", report.severity)
        .text("lat", report.lat.to_string())
        .text("lng", report.lng.to_string())
        .part("media", media))
}
