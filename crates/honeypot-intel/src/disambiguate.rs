//! Email / payment-handle overlap resolution.
//!
//! The handle matcher stops at the first hyphen of a domain, so an email
//! like `offers@fake-amazon-deals.com` also yields the handle candidate
//! `offers@fake`. When both readings exist in one message, the email wins.

use crate::extract::LOCAL_PART_LEAD;

/// Drop handle candidates that are truncations of a detected email.
///
/// A candidate is discarded when it equals the email's local part joined to
/// the leading alphanumeric run of its domain, or when it is a strict prefix
/// of the full address. Comparison is case-insensitive and ignores leading
/// `.`, `-` and `_` on either side.
pub fn disambiguate(candidates: Vec<String>, emails: &[String]) -> Vec<String> {
    if emails.is_empty() {
        return candidates;
    }
    let emails: Vec<(String, String)> = emails
        .iter()
        .map(|e| {
            let e = e.trim_start_matches(LOCAL_PART_LEAD);
            (e.to_lowercase(), truncated_prefix(e).to_lowercase())
        })
        .collect();

    candidates
        .into_iter()
        .filter(|candidate| {
            let lower = candidate.trim_start_matches(LOCAL_PART_LEAD).to_lowercase();
            let collides = emails.iter().any(|(full, prefix)| {
                lower == *prefix || (full.len() > lower.len() && full.starts_with(&lower))
            });
            if collides {
                tracing::debug!(candidate = %candidate, "dropping handle shadowed by email");
            }
            !collides
        })
        .collect()
}

/// `local@` plus the leading alphanumeric run of the domain.
fn truncated_prefix(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let run: String = domain.chars().take_while(|c| c.is_ascii_alphanumeric()).collect();
            format!("{local}@{run}")
        }
        None => email.to_string(),
    }
}
