// ── Walking directions ──
//
// Converts an OpenRouteService route feature into what the directions
// panel shows: a `[lat, lon]` polyline, a total distance label, and one
// line per step.

use serde::Serialize;

use sagip_api::RouteFeature;

/// Distance label: kilometres with two decimals from 1 km up, otherwise
/// whole metres.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{:.0} m", meters.max(0.0).round())
    }
}

/// One turn-by-turn instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStep {
    pub instruction: String,
    pub distance_m: f64,
    /// `"<instruction> in <distance>"`.
    pub text: String,
}

/// A walking route ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkingRoute {
    /// Polyline in `[lat, lon]` order.
    pub path: Vec<[f64; 2]>,
    pub distance_m: f64,
    pub duration_s: f64,
    pub steps: Vec<RouteStep>,
}

impl WalkingRoute {
    pub fn distance_label(&self) -> String {
        format_distance(self.distance_m)
    }

    /// Walking time rounded up to whole minutes.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
    pub fn duration_minutes(&self) -> u64 {
        (self.duration_s.max(0.0) / 60.0).ceil() as u64
    }
}

impl From<RouteFeature> for WalkingRoute {
    fn from(feature: RouteFeature) -> Self {
        let path = feature
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| [lat, lon])
            .collect();

        let segment = feature.properties.segments.into_iter().next();
        let (distance_m, duration_s, steps) = segment.map_or((0.0, 0.0, Vec::new()), |s| {
            let steps = s
                .steps
                .into_iter()
                .map(|step| {
                    let text = format!("{} in {}", step.instruction, format_distance(step.distance));
                    RouteStep {
                        instruction: step.instruction,
                        distance_m: step.distance,
                        text,
                    }
                })
                .collect();
            (s.distance, s.duration, steps)
        });

        Self {
            path,
            distance_m,
            duration_s,
            steps,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn distance_labels() {
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(999.6), "1000 m");
        assert_eq!(format_distance(1000.0), "1.00 km");
        assert_eq!(format_distance(1234.5), "1.23 km");
        assert_eq!(format_distance(0.0), "0 m");
    }

    #[test]
    fn route_from_feature() {
        let feature: RouteFeature = serde_json::from_value(json!({
            "geometry": { "coordinates": [[121.244, 14.1709], [121.246, 14.172]] },
            "properties": {
                "segments": [{
                    "distance": 1523.7,
                    "duration": 1097.1,
                    "steps": [
                        { "distance": 320.2, "duration": 230.5, "instruction": "Head east on Lopez Avenue" },
                        { "distance": 1203.5, "duration": 866.6, "instruction": "Turn left onto Jamboree Road" },
                        { "distance": 0.0, "duration": 0.0, "instruction": "Arrive at your destination, on the left" }
                    ]
                }]
            }
        }))
        .unwrap();

        let route = WalkingRoute::from(feature);
        assert_eq!(route.path[0], [14.1709, 121.244]);
        assert_eq!(route.duration_minutes(), 19);

        let mut lines = vec![format!("Total: {}", route.distance_label())];
        lines.extend(route.steps.iter().map(|s| s.text.clone()));
        insta::assert_snapshot!(lines.join("\n"), @r"
        Total: 1.52 km
        Head east on Lopez Avenue in 320 m
        Turn left onto Jamboree Road in 1.20 km
        Arrive at your destination, on the left in 0 m
        ");
    }

    #[test]
    fn route_without_segments_is_empty() {
        let feature: RouteFeature = serde_json::from_value(json!({
            "geometry": { "coordinates": [] },
            "properties": { "segments": [] }
        }))
        .unwrap();
        let route = WalkingRoute::from(feature);
        assert!(route.steps.is_empty());
        assert_eq!(route.distance_label(), "0 m");
    }
}
