// Evacuation center endpoints
//
// Both the list and the detail view hit the same controller script; the
// detail view adds `?id=`. The detail response shape varies between
// deployments (object, single-element array, or `null`), so it is decoded
// loosely and normalized here.

use tracing::debug;

use crate::backend::client::BackendClient;
use crate::backend::models::CenterRecord;
use crate::error::{Error, body_preview};

impl BackendClient {
    /// List every evacuation center.
    ///
    /// `GET {centers}`
    pub async fn list_centers(&self) -> Result<Vec<CenterRecord>, Error> {
        let url = self.endpoint_url(&self.endpoints().centers)?;
        debug!("listing evacuation centers");
        self.get(url, &[]).await
    }

    /// Fetch one evacuation center by id. Returns `None` when the backend
    /// has no such record.
    ///
    /// `GET {centers}?id={id}`
    pub async fn get_center(&self, id: &str) -> Result<Option<CenterRecord>, Error> {
        let url = self.endpoint_url(&self.endpoints().centers)?;
        debug!(id, "fetching evacuation center");
        let value: serde_json::Value = self.get(url, &[("id", id.to_owned())]).await?;
        center_from_value(value)
    }
}

fn center_from_value(value: serde_json::Value) -> Result<Option<CenterRecord>, Error> {
    let record = match value {
        serde_json::Value::Array(mut items) => {
            if items.is_empty() {
                return Ok(None);
            }
            items.swap_remove(0)
        }
        serde_json::Value::Object(ref map) if map.is_empty() => return Ok(None),
        obj @ serde_json::Value::Object(_) => obj,
        _ => return Ok(None),
    };
    serde_json::from_value(record.clone())
        .map(Some)
        .map_err(|e| {
            let body = record.to_string();
            Error::Deserialization {
                message: format!("{e} (body preview: {:?})", body_preview(&body)),
                body,
            }
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_accepts_object() {
        let rec = center_from_value(json!({"id": 1, "name": "Gym", "capacity": 10}))
            .unwrap()
            .unwrap();
        assert_eq!(rec.name, "Gym");
    }

    #[test]
    fn detail_accepts_single_element_array() {
        let rec = center_from_value(json!([{"id": 1, "name": "Gym"}]))
            .unwrap()
            .unwrap();
        assert_eq!(rec.name, "Gym");
    }

    #[test]
    fn detail_missing_shapes_are_none() {
        assert!(center_from_value(json!(null)).unwrap().is_none());
        assert!(center_from_value(json!([])).unwrap().is_none());
        assert!(center_from_value(json!({})).unwrap().is_none());
        assert!(center_from_value(json!(false)).unwrap().is_none());
    }
}
