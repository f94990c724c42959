//! Payment handles ("UPI-style" `user@provider` aliases).
//!
//! Candidates returned here still need email disambiguation; see
//! [`crate::disambiguate`].

use once_cell::sync::Lazy;
use regex::Regex;

use super::LOCAL_PART_LEAD;
use crate::types::dedup_case_insensitive;

// The provider side is captured with any dotted suffix so that dotted
// domains can be rejected outright. It stops at a hyphen, which is exactly
// how a multi-segment email domain produces a truncated candidate.
static HANDLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-zA-Z0-9._%+-]+)@([a-zA-Z][a-zA-Z0-9]*(?:\.[a-zA-Z0-9]+)*)").unwrap()
});

/// Providers that identify an email address, never a payment handle.
pub const EMAIL_PROVIDERS: &[&str] = &[
    "gmail",
    "googlemail",
    "yahoo",
    "ymail",
    "hotmail",
    "outlook",
    "rediffmail",
    "rediff",
    "protonmail",
    "proton",
    "icloud",
    "me",
    "mail",
    "email",
    "live",
    "msn",
    "aol",
    "zoho",
    "gmx",
    "yandex",
];

/// Bank and wallet handle suffixes accepted regardless of length.
pub const HANDLE_PROVIDERS: &[&str] = &[
    "sbi",
    "oksbi",
    "hdfc",
    "hdfcbank",
    "okhdfcbank",
    "icici",
    "okicici",
    "axis",
    "axisbank",
    "okaxis",
    "axl",
    "upi",
    "paytm",
    "ptyes",
    "ptaxis",
    "gpay",
    "phonepe",
    "ybl",
    "ibl",
    "apl",
    "yapl",
    "kotak",
    "kmbl",
    "pnb",
    "boi",
    "barodampay",
    "unionbank",
    "idfcbank",
    "indus",
    "federal",
    "rbl",
    "airtel",
    "jio",
    "freecharge",
    "mobikwik",
    "amazonpay",
    "waicici",
    "wahdfcbank",
];

/// Provider names up to this length are plausible handles even when not allow-listed.
const MAX_UNLISTED_PROVIDER_LEN: usize = 10;

/// Candidate payment handles, before email disambiguation.
pub fn extract_handle_candidates(text: &str) -> Vec<String> {
    let found = HANDLE_RE.captures_iter(text).filter_map(|cap| {
        let user = cap.get(1)?.as_str().trim_start_matches(LOCAL_PART_LEAD);
        let provider = cap.get(2)?.as_str();
        if user.is_empty() || !is_handle_provider(provider) {
            return None;
        }
        Some(format!("{user}@{provider}"))
    });
    dedup_case_insensitive(found)
}

/// Whether the right-hand side of `user@provider` looks like a payment provider.
pub fn is_handle_provider(provider: &str) -> bool {
    let lower = provider.to_lowercase();
    if EMAIL_PROVIDERS.contains(&lower.as_str()) {
        return false;
    }
    if lower.contains('.') {
        return false;
    }
    HANDLE_PROVIDERS.contains(&lower.as_str()) || lower.len() <= MAX_UNLISTED_PROVIDER_LEN
}
