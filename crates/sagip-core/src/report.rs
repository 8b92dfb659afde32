// ── Incident report validation ──
//
// Reports are validated client-side before any network call. A draft is
// trimmed, checked in a fixed order (photo, severity, required text, phone
// pattern, location) and only then turned into a wire submission. Nothing
// about a report is kept after it is sent.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use thiserror::Error;

use sagip_api::{IncidentSubmission, MediaUpload, guess_mime};

use crate::geo::Coordinates;

/// Reporter-assessed severity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Moderate,
    Minor,
}

/// Why a draft cannot be submitted. Messages are shown to the reporter as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportValidationError {
    #[error("Please take a photo first.")]
    MissingPhoto,
    #[error("Please select severity.")]
    MissingSeverity,
    #[error("Phone number is required")]
    MissingPhone,
    #[error("Description is required")]
    MissingDescription,
    #[error("Name is required")]
    MissingName,
    #[error("Enter a valid PH number (e.g. 639123456789)")]
    InvalidPhone,
    #[error("Location is required")]
    MissingLocation,
}

/// `63` country code followed by a ten-digit subscriber number.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^63[0-9]{10}$").expect("valid regex"));

/// Philippine mobile number in international form: `63` then ten digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate a trimmed phone string.
    pub fn parse(raw: &str) -> Result<Self, ReportValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ReportValidationError::MissingPhone);
        }
        if PHONE_RE.is_match(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(ReportValidationError::InvalidPhone)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = ReportValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// An incident report being filled in.
#[derive(Debug, Clone, Default)]
pub struct IncidentDraft {
    pub reporter_name: String,
    pub reporter_contact: String,
    pub description: String,
    pub severity: Option<Severity>,
    pub location: Option<Coordinates>,
    pub photo: Option<MediaUpload>,
}

impl IncidentDraft {
    /// Attach photo bytes, guessing the MIME type from the file name.
    pub fn with_photo(mut self, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        self.photo = Some(MediaUpload {
            mime_type: guess_mime(&file_name).to_owned(),
            file_name,
            bytes,
        });
        self
    }

    /// Trim and validate. The first failing check wins.
    pub fn validate(self) -> Result<IncidentReport, ReportValidationError> {
        let photo = self
            .photo
            .filter(|p| !p.bytes.is_empty())
            .ok_or(ReportValidationError::MissingPhoto)?;
        let severity = self.severity.ok_or(ReportValidationError::MissingSeverity)?;

        let reporter_contact = self.reporter_contact.trim();
        let description = self.description.trim();
        let reporter_name = self.reporter_name.trim();
        if reporter_contact.is_empty() {
            return Err(ReportValidationError::MissingPhone);
        }
        if description.is_empty() {
            return Err(ReportValidationError::MissingDescription);
        }
        if reporter_name.is_empty() {
            return Err(ReportValidationError::MissingName);
        }

        let reporter_contact = PhoneNumber::parse(reporter_contact)?;
        let location = self.location.ok_or(ReportValidationError::MissingLocation)?;

        Ok(IncidentReport {
            reporter_name: reporter_name.to_owned(),
            reporter_contact,
            description: description.to_owned(),
            severity,
            location,
            photo,
        })
    }
}

/// A validated report, ready to send once.
#[derive(Debug, Clone)]
pub struct IncidentReport {
    pub reporter_name: String,
    pub reporter_contact: PhoneNumber,
    pub description: String,
    pub severity: Severity,
    pub location: Coordinates,
    pub photo: MediaUpload,
}

impl From<IncidentReport> for IncidentSubmission {
    fn from(report: IncidentReport) -> Self {
        Self {
            reporter_name: report.reporter_name,
            reporter_contact: report.reporter_contact.0,
            description: report.description,
            severity: report.severity.to_string(),
            lat: report.location.lat,
            lng: report.location.lon,
            media: report.photo,
        }
    }
}
