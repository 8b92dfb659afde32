// Wire types for the municipal PHP backend.
//
// Field names mirror the backend's JSON exactly, typos included. Domain
// conversion lives in `sagip-core::convert`.

use serde::{Deserialize, Serialize};

use crate::lenient::{self, RawId};

/// One evacuation center row.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CenterRecord {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub capacity: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub current_evacuees: u32,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub contact_person: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub contact_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub long: Option<f64>,
    /// Free-text provenance, conventionally `"<user>, <barangay>"`.
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub created_by: Option<String>,
}

/// One barangay emergency-contact row.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactRecord {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub barangay_name: String,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub contact_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub landline: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub email: Option<String>,
    #[serde(
        default,
        alias = "faceebook_page",
        deserialize_with = "lenient::optional_string"
    )]
    pub facebook_page: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub captain_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub secretary_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub lat: Option<f64>,
    #[serde(default, alias = "long", deserialize_with = "lenient::optional_f64")]
    pub lng: Option<f64>,
}

/// One hazard or facility marker row.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HazardRecord {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub lng: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub address: Option<String>,
}

/// `{ success, data, error? }` envelope used by the newer PHP endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `{ success, error? }` acknowledgement for writes.
#[derive(Debug, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    /// The backend's explanation, if it gave one.
    pub fn reason(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Multipart payload for `createIncident.php`.
///
/// Field values are already trimmed and validated by the caller; this type
/// only knows how to put them on the wire.
#[derive(Debug, Clone)]
pub struct IncidentSubmission {
    pub reporter_name: String,
    pub reporter_contact: String,
    pub description: String,
    pub severity: String,
    pub lat: f64,
    pub lng: f64,
    pub media: MediaUpload,
}

/// Attached photo bytes plus the metadata the form part needs.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    /// Read a photo from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: &std::path::Path) -> Result<Self, crate::Error> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("photo")
            .to_owned();
        Ok(Self {
            mime_type: guess_mime(&file_name).into(),
            file_name,
            bytes,
        })
    }
}

/// MIME type for common camera outputs; everything else is opaque bytes.
pub fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn center_with_string_numbers() {
        let rec: CenterRecord = serde_json::from_value(json!({
            "id": "7",
            "name": "Covered Court",
            "location": "Brgy. Dayap",
            "capacity": "120",
            "current_evacuees": "30",
            "contact_person": "Juan",
            "contact_number": 9_171_234_567_i64,
            "lat": "14.17",
            "long": null,
            "created_by": "admin, Dayap"
        }))
        .unwrap();
        assert_eq!(rec.id, Some(RawId::Text("7".into())));
        assert_eq!(rec.capacity, 120);
        assert_eq!(rec.current_evacuees, 30);
        assert_eq!(rec.contact_number.as_deref(), Some("9171234567"));
        assert_eq!(rec.lat, Some(14.17));
        assert_eq!(rec.long, None);
    }

    #[test]
    fn contact_accepts_misspelled_facebook_key() {
        let rec: ContactRecord = serde_json::from_value(json!({
            "id": 3,
            "barangay_name": "san-isidro",
            "faceebook_page": "https://facebook.com/brgysanisidro",
            "lat": 14.2,
            "lng": "121.25"
        }))
        .unwrap();
        assert_eq!(
            rec.facebook_page.as_deref(),
            Some("https://facebook.com/brgysanisidro")
        );
        assert_eq!(rec.lng, Some(121.25));
    }

    #[test]
    fn hazard_type_maps_to_kind() {
        let rec: HazardRecord =
            serde_json::from_value(json!({"id": "1", "type": "Flood", "lat": "14.1", "lng": "121.2"}))
                .unwrap();
        assert_eq!(rec.kind, "Flood");
        assert!(rec.address.is_none());
    }

    #[test]
    fn mime_guessing() {
        assert_eq!(guess_mime("IMG_0001.JPG"), "image/jpeg");
        assert_eq!(guess_mime("flood.png"), "image/png");
        assert_eq!(guess_mime("noext"), "application/octet-stream");
    }
}
