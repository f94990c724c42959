//! Phone numbers, canonicalized to `+<cc>-<10 digits>`.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// `+` country code, then ten digits with optional single separators between them.
static INTL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+\s?([0-9]{1,3})[\s-]*([0-9](?:[\s-]?[0-9]){9})\b").unwrap());
/// Bare mobile-shaped number with no adjacent digits.
static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[6-9][0-9]{9}\b").unwrap());

/// Country code assumed for bare mobile numbers.
pub const DEFAULT_COUNTRY_CODE: &str = "91";

struct PhoneMatch {
    start: usize,
    country_code: String,
    core: String,
}

/// Extract phone numbers in first-seen order, de-duplicated by their 10-digit core.
pub fn extract_phone_numbers(text: &str) -> Vec<String> {
    let mut matches: Vec<PhoneMatch> = Vec::new();

    for cap in INTL_RE.captures_iter(text) {
        let (Some(whole), Some(cc), Some(rest)) = (cap.get(0), cap.get(1), cap.get(2)) else {
            continue;
        };
        matches.push(PhoneMatch {
            start: whole.start(),
            country_code: cc.as_str().to_string(),
            core: digits_only(rest.as_str()),
        });
    }

    for m in MOBILE_RE.find_iter(text) {
        matches.push(PhoneMatch {
            start: m.start(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            core: m.as_str().to_string(),
        });
    }

    matches.sort_by_key(|m| m.start);

    let mut seen: HashSet<String> = HashSet::new();
    matches
        .into_iter()
        .filter(|m| seen.insert(m.core.clone()))
        .map(|m| canonicalize(&m.country_code, &m.core))
        .collect()
}

/// Render a number in the stored display form.
pub fn canonicalize(country_code: &str, core: &str) -> String {
    format!("+{country_code}-{core}")
}

fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaced_country_code() {
        let phones = extract_phone_numbers("Call +91 8765432109 now");
        assert!(phones.iter().any(|p| p.contains("+91-8765432109")));
    }

    #[test]
    fn test_formats_converge() {
        for text in [
            "+91-9876543210",
            "+919876543210",
            "+91 98765 43210",
            "+91 98765-43210",
            "9876543210",
        ] {
            assert_eq!(extract_phone_numbers(text), vec!["+91-9876543210"], "input: {text}");
        }
    }

    #[test]
    fn test_dedup_by_core() {
        let phones = extract_phone_numbers("Call +91-9876543210 or 9876543210 or +91 98765 43210");
        assert_eq!(phones, vec!["+91-9876543210"]);
    }

    #[test]
    fn test_other_country_code_kept() {
        assert_eq!(extract_phone_numbers("ring +44 7911123456"), vec!["+44-7911123456"]);
    }

    #[test]
    fn test_first_seen_order() {
        let phones = extract_phone_numbers("first 8765432109 then +91-9876543210");
        assert_eq!(phones, vec!["+91-8765432109", "+91-9876543210"]);
    }

    #[test]
    fn test_mixed_script_digits_ignored() {
        assert!(extract_phone_numbers("Call 9\u{96e}\u{96d}\u{96c}\u{96b}\u{96a}\u{969}\u{968}\u{967}\u{966} now").is_empty());
        assert!(extract_phone_numbers("+91 \u{96f}\u{96e}\u{96d}\u{96c}\u{96b}\u{96a}\u{969}\u{968}\u{967}\u{966}").is_empty());
    }

    #[test]
    fn test_non_mobile_shapes_ignored() {
        assert!(extract_phone_numbers("timestamp 1730000000").is_empty());
        assert!(extract_phone_numbers("account 1234567890123456").is_empty());
        assert!(extract_phone_numbers("98765432").is_empty());
    }
}
