// Hazard marker endpoints
//
// `disasterMapping.php` wraps its payload in `{ success, data }`.

use tracing::debug;

use crate::backend::client::BackendClient;
use crate::backend::models::{Envelope, HazardRecord};
use crate::error::Error;

impl BackendClient {
    /// List hazard and facility markers.
    ///
    /// `GET {hazards}` -> `{ "success": true, "data": [...] }`
    pub async fn list_hazards(&self) -> Result<Vec<HazardRecord>, Error> {
        let url = self.endpoint_url(&self.endpoints().hazards)?;
        debug!("listing hazard markers");
        let envelope: Envelope<HazardRecord> = self.get(url, &[]).await?;
        if envelope.success {
            Ok(envelope.data)
        } else {
            Err(Error::Rejected {
                message: envelope
                    .error
                    .or(envelope.message)
                    .unwrap_or_else(|| "hazard feed reported success=false".into()),
            })
        }
    }
}
