//! Email addresses.

use once_cell::sync::Lazy;
use regex::Regex;

use super::LOCAL_PART_LEAD;
use crate::types::dedup_case_insensitive;

// The domain must carry at least one dot before a 2+ letter TLD; that dot is
// what separates an email from a payment handle.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

pub fn extract_emails(text: &str) -> Vec<String> {
    let found = EMAIL_RE.find_iter(text).map(|m| {
        m.as_str().trim_start_matches(LOCAL_PART_LEAD).to_string()
    });
    dedup_case_insensitive(found)
}
