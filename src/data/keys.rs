use once_cell::sync::Lazy;
use regex::Regex;

// ---------------------------------------------------------------------------
// Key normalization: raw header / field name → canonical key
// ---------------------------------------------------------------------------

static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Canonical key for a column header or unit label.
///
/// Every parenthesized run (e.g. a unit annotation like `(MPa)`) is removed,
/// then all whitespace. Non-ASCII letters and punctuation outside the
/// parentheses survive, so `"Young's Modulus (MPa)"` becomes `"Young'sModulus"`.
pub fn normalize_header(raw: &str) -> String {
    let without_units = PARENTHESIZED.replace_all(raw, "");
    WHITESPACE
        .replace_all(&without_units, "")
        .trim()
        .to_string()
}

/// Canonical key for a record field: ASCII letters and digits only.
///
/// Records are looked up by this key while labels come from the header rule,
/// so the two must stay distinct.
pub fn normalize_field_key(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_drops_units_and_whitespace() {
        assert_eq!(normalize_header("Tensile Strength (MPa)"), "TensileStrength");
        assert_eq!(normalize_header("  Density (g/cm3) "), "Density");
        assert_eq!(normalize_header("A (x) B (y) C"), "ABC");
    }

    #[test]
    fn header_keeps_non_alnum_letters() {
        assert_eq!(normalize_header("Young's Modulus (MPa)"), "Young'sModulus");
        assert_eq!(normalize_header("Dichte ä"), "Dichteä");
    }

    #[test]
    fn header_unbalanced_parenthesis_is_kept() {
        assert_eq!(normalize_header("Weird (open"), "Weird(open");
    }

    #[test]
    fn field_key_is_ascii_alnum_only() {
        assert_eq!(normalize_field_key("Elongation at Break (%)"), "ElongationatBreak");
        assert_eq!(normalize_field_key("Young's Modulus (MPa)"), "YoungsModulusMPa");
        assert_eq!(normalize_field_key("Material Name"), "MaterialName");
        assert_eq!(normalize_field_key("ä-ö"), "");
    }

    #[test]
    fn empty_input_gives_empty_key() {
        assert_eq!(normalize_header(""), "");
        assert_eq!(normalize_field_key(""), "");
    }
}
