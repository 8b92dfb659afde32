// ── Reverse-geocoded address formatting ──
//
// Nominatim answers with a long display name and a bag of address parts.
// Hazard popups want the display name minus the province/region/country
// tail; the report form wants a compact "road, purok, barangay, city" line.

use sagip_api::AddressParts;

use crate::geo::Coordinates;

/// Shown when reverse geocoding fails or returns nothing.
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// Region names dropped from display names by default.
pub const DEFAULT_REGION_SUFFIXES: &[&str] = &["Laguna", "Calabarzon", "Philippines"];

/// Remove every `", <region>"` occurrence from a Nominatim display name.
///
/// Blank input yields [`UNKNOWN_LOCATION`].
pub fn shorten_display_name<S: AsRef<str>>(display_name: &str, regions: &[S]) -> String {
    let mut out = display_name.to_owned();
    for region in regions {
        let region = region.as_ref().trim();
        if region.is_empty() {
            continue;
        }
        out = strip_segment(&out, region);
    }
    let out = out.trim();
    if out.is_empty() {
        UNKNOWN_LOCATION.to_owned()
    } else {
        out.to_owned()
    }
}

/// Drop `,<spaces><region>` wherever it appears.
fn strip_segment(haystack: &str, region: &str) -> String {
    let mut out = String::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(comma) = rest.find(',') {
        let (head, tail) = rest.split_at(comma);
        out.push_str(head);
        let after = tail[1..].trim_start();
        if let Some(remaining) = after.strip_prefix(region) {
            rest = remaining;
        } else {
            out.push(',');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Compact label for the report form.
///
/// `road, purok, barangay, city`, skipping parts Nominatim did not return.
/// A missing road reads "Unnamed road". With no address parts at all the
/// label falls back to the raw coordinates.
pub fn report_location_label(address: Option<&AddressParts>, at: Coordinates) -> String {
    let Some(a) = address else {
        return unnamed_area(at);
    };

    let purok = first_of(&[&a.neighbourhood, &a.suburb, &a.hamlet, &a.quarter]);
    let barangay = first_of(&[&a.village, &a.town, &a.city_district]);
    let city = first_of(&[&a.city, &a.municipality]);

    if a.road.is_none() && purok.is_none() && barangay.is_none() && city.is_none() {
        return unnamed_area(at);
    }

    let road = a.road.as_deref().unwrap_or("Unnamed road");
    std::iter::once(road)
        .chain(purok)
        .chain(barangay)
        .chain(city)
        .collect::<Vec<_>>()
        .join(", ")
}

fn first_of<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .find_map(|c| c.as_deref().map(str::trim).filter(|s| !s.is_empty()))
}

fn unnamed_area(at: Coordinates) -> String {
    format!("Unnamed area near ({:.5}, {:.5})", at.lat, at.lon)
}
