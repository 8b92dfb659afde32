// ── Record identity ──
//
// The backend sends ids as integers or numeric strings depending on the
// endpoint. `RecordId` normalizes both to one string form so `7` and `"7"`
// compare equal.

use std::fmt;

use serde::{Deserialize, Serialize};

use sagip_api::RawId;

/// Opaque backend identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for the placeholder given to records the backend sent without
    /// an id.
    pub fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RawId> for RecordId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s.trim().to_owned()),
        }
    }
}

impl From<Option<RawId>> for RecordId {
    fn from(raw: Option<RawId>) -> Self {
        raw.map_or_else(|| Self(String::new()), Self::from)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.trim().to_owned())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
