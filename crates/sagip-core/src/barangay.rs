// ── Barangay names ──
//
// Centers carry no barangay foreign key. The backend's `created_by` field is
// conventionally `"<account>, <barangay>"`, so the barangay is read from its
// last comma segment. This join is fragile: it breaks as soon as an account
// name contains a comma or an admin forgets the suffix. Replace it with a
// real field once the backend exposes one.

/// Barangays served by the portal, as `(display name, slug)`.
pub const BARANGAYS: &[(&str, &str)] = &[
    ("Anos", "anos"),
    ("Bagong Silang", "bagong-silang"),
    ("Bambang", "bambang"),
    ("Batong Malake", "batong-malake"),
    ("Baybayin", "baybayin"),
    ("Bayog", "bayog"),
    ("Lalakay", "lalakay"),
    ("Maahas", "maahas"),
    ("Malinta", "malinta"),
    ("Mayondon", "mayondon"),
    ("Putho-Tuntungin", "putho-tuntungin"),
    ("San Antonio", "san-antonio"),
    ("Tadlac", "tadlac"),
    ("Timugan", "timugan"),
];

/// Logo used when no barangay can be derived.
pub const DEFAULT_LOGO: &str = "default-logo.png";

/// Logo for centers run by the municipal office itself.
pub const MUNICIPAL_LOGO: &str = "lb-logo.png";

const MUNICIPAL_SLUG: &str = "municipality-of-los-banos";

/// Barangay named in a `created_by` string: its last comma segment, trimmed.
///
/// Returns `None` when there is no comma or the segment is blank.
pub fn from_created_by(created_by: &str) -> Option<&str> {
    let (_, last) = created_by.rsplit_once(',')?;
    let last = last.trim();
    (!last.is_empty()).then_some(last)
}

/// URL-safe form: lowercase, accents folded, whitespace runs → `-`, other
/// non-word characters dropped.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            pending_dash = !out.is_empty();
            continue;
        }
        let ch = fold_accent(ch);
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            if pending_dash {
                out.push('-');
                pending_dash = false;
            }
            out.push(ch);
        }
    }
    out
}

fn fold_accent(ch: char) -> char {
    match ch {
        'ñ' => 'n',
        'á' | 'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        other => other,
    }
}

/// Title-cased display name from a slug-like key (`"san-isidro"` →
/// `"San Isidro"`).
pub fn display_name(key: &str) -> String {
    key.split(['-', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Logo file name for a barangay.
pub fn logo_file(barangay: Option<&str>) -> String {
    match barangay.map(slug) {
        Some(s) if s == MUNICIPAL_SLUG => MUNICIPAL_LOGO.to_owned(),
        Some(s) if !s.is_empty() => format!("{s}-logo.png"),
        _ => DEFAULT_LOGO.to_owned(),
    }
}

/// `true` if two barangay spellings refer to the same place.
pub fn same(a: &str, b: &str) -> bool {
    slug(a) == slug(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn barangay_is_last_comma_segment() {
        assert_eq!(from_created_by("admin, Bagong Silang"), Some("Bagong Silang"));
        assert_eq!(from_created_by("Juan, Dela Cruz, Bayog "), Some("Bayog"));
        assert_eq!(from_created_by("admin"), None);
        assert_eq!(from_created_by("admin,   "), None);
    }

    #[test]
    fn slugs() {
        assert_eq!(slug("Bagong Silang"), "bagong-silang");
        assert_eq!(slug("  Putho-Tuntungin "), "putho-tuntungin");
        assert_eq!(slug("Brgy. San  Antonio"), "brgy-san-antonio");
        assert_eq!(slug("Municipality of Los Baños"), MUNICIPAL_SLUG);
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("san-isidro"), "San Isidro");
        assert_eq!(display_name("BATONG-MALAKE"), "Batong Malake");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn logos() {
        assert_eq!(logo_file(Some("Bagong Silang")), "bagong-silang-logo.png");
        assert_eq!(logo_file(Some("Municipality of Los Baños")), MUNICIPAL_LOGO);
        assert_eq!(logo_file(None), DEFAULT_LOGO);
        assert_eq!(logo_file(Some("...")), DEFAULT_LOGO);
    }

    #[test]
    fn known_slugs_are_canonical() {
        for (name, key) in BARANGAYS {
            assert_eq!(slug(name), *key);
        }
    }

    #[test]
    fn same_ignores_case_and_separators() {
        assert!(same("Bagong Silang", "bagong-silang"));
        assert!(!same("Bayog", "Bambang"));
    }
}
