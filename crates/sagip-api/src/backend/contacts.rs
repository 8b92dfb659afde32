// Barangay contact endpoints

use tracing::debug;

use crate::backend::client::BackendClient;
use crate::backend::models::ContactRecord;
use crate::error::Error;

impl BackendClient {
    /// List every barangay emergency contact.
    ///
    /// `GET {contacts}`
    pub async fn list_contacts(&self) -> Result<Vec<ContactRecord>, Error> {
        let url = self.endpoint_url(&self.endpoints().contacts)?;
        debug!("listing barangay contacts");
        self.get(url, &[]).await
    }
}
