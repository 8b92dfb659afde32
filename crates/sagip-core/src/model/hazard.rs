use std::fmt;

use serde::{Serialize, Serializer};

use crate::geo::{Coordinates, Located};
use crate::model::RecordId;

/// Kind of map marker. Unknown backend types are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HazardKind {
    Flood,
    Landslide,
    FallenTree,
    RoadBlockage,
    Hospital,
    Pharmacy,
    Other(String),
}

impl HazardKind {
    /// Every known kind, in filter-bar order.
    pub const KNOWN: [HazardKind; 6] = [
        HazardKind::Flood,
        HazardKind::Landslide,
        HazardKind::FallenTree,
        HazardKind::RoadBlockage,
        HazardKind::Hospital,
        HazardKind::Pharmacy,
    ];

    /// Parse the backend's `type` value. Matching ignores case and spaces.
    pub fn parse(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "flood" => Self::Flood,
            "landslide" => Self::Landslide,
            "fallentree" => Self::FallenTree,
            "roadblockage" => Self::RoadBlockage,
            "hospital" => Self::Hospital,
            "pharmacy" => Self::Pharmacy,
            _ => Self::Other(raw.trim().to_owned()),
        }
    }

    /// Wire name, as the backend spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Flood => "Flood",
            Self::Landslide => "Landslide",
            Self::FallenTree => "FallenTree",
            Self::RoadBlockage => "RoadBlockage",
            Self::Hospital => "Hospital",
            Self::Pharmacy => "Pharmacy",
            Self::Other(s) => s,
        }
    }

    /// Human label: CamelCase split into words (`FallenTree` → `Fallen Tree`).
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut out = String::with_capacity(name.len() + 4);
        for (i, ch) in name.chars().enumerate() {
            if i > 0 && ch.is_uppercase() && !out.ends_with(' ') {
                out.push(' ');
            }
            out.push(ch);
        }
        out
    }

    /// Facilities are points of help, not hazards.
    pub fn is_facility(&self) -> bool {
        matches!(self, Self::Hospital | Self::Pharmacy)
    }

    /// Marker icon path, if the kind has one.
    pub fn icon(&self) -> Option<&'static str> {
        Some(match self {
            Self::Flood => "/icons/flood.png",
            Self::Landslide => "/icons/landslide.png",
            Self::FallenTree => "/icons/tree.png",
            Self::RoadBlockage => "/icons/road-blockage.png",
            Self::Hospital => "/icons/hospital.png",
            Self::Pharmacy => "/icons/pharmacy.png",
            Self::Other(_) => return None,
        })
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HazardKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A hazard or facility pin on the risk map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardMarker {
    pub id: RecordId,
    pub kind: HazardKind,
    pub coordinates: Option<Coordinates>,
    /// Backend address, or one backfilled by reverse geocoding.
    pub address: Option<String>,
}

impl Located for HazardMarker {
    fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_known_kinds_loosely() {
        assert_eq!(HazardKind::parse("Flood"), HazardKind::Flood);
        assert_eq!(HazardKind::parse("fallen tree"), HazardKind::FallenTree);
        assert_eq!(HazardKind::parse("ROAD_BLOCKAGE"), HazardKind::RoadBlockage);
        assert_eq!(
            HazardKind::parse(" Earthquake "),
            HazardKind::Other("Earthquake".into())
        );
    }

    #[test]
    fn labels_split_camel_case() {
        assert_eq!(HazardKind::FallenTree.label(), "Fallen Tree");
        assert_eq!(HazardKind::RoadBlockage.label(), "Road Blockage");
        assert_eq!(HazardKind::Flood.label(), "Flood");
        assert_eq!(HazardKind::Other("StormSurge".into()).label(), "Storm Surge");
    }

    #[test]
    fn facilities() {
        assert!(HazardKind::Hospital.is_facility());
        assert!(HazardKind::Pharmacy.is_facility());
        assert!(!HazardKind::Landslide.is_facility());
        assert_eq!(HazardKind::Other("x".into()).icon(), None);
    }

    #[test]
    fn serializes_as_wire_name() {
        let json = serde_json::to_string(&HazardKind::FallenTree).unwrap_or_default();
        assert_eq!(json, "\"FallenTree\"");
    }
}
