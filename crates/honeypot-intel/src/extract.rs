//! Per-message entity extraction.
//!
//! Each entity type has its own matcher module. All matchers run over the
//! same input independently; the only cross-type step is the email/handle
//! disambiguation applied before the result is returned. Every pattern is
//! compiled once and uses the `regex` crate, so matching is linear in the
//! input length.

pub mod accounts;
pub mod emails;
pub mod handles;
pub mod keywords;
pub mod links;
pub mod phones;
pub mod references;

use crate::disambiguate::disambiguate;

/// Leading characters stripped from the local part of both emails and handles.
pub(crate) const LOCAL_PART_LEAD: &[char] = &['.', '-', '_'];
use crate::types::ExtractedIntelligence;

/// Extract every entity type from a single message.
///
/// Total over all strings: empty or whitespace-only input yields an empty result.
pub fn extract(text: &str) -> ExtractedIntelligence {
    if text.trim().is_empty() {
        return ExtractedIntelligence::default();
    }

    let email_addresses = emails::extract_emails(text);
    let upi_ids = disambiguate(handles::extract_handle_candidates(text), &email_addresses);
    let references = references::extract_references(text);

    ExtractedIntelligence {
        bank_accounts: accounts::extract_bank_accounts(text),
        upi_ids,
        phishing_links: links::extract_links(text),
        phone_numbers: phones::extract_phone_numbers(text),
        email_addresses,
        case_ids: references.case_ids,
        policy_numbers: references.policy_numbers,
        order_numbers: references.order_numbers,
        suspicious_keywords: keywords::extract_keywords(text),
    }
}
