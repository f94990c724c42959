//! Cumulative merge of intelligence sets.

use crate::types::{dedup_case_insensitive, ExtractedIntelligence};

/// Fold `increment` into `aggregate`, returning a new value.
///
/// Per field: `aggregate`'s values, then `increment`'s, de-duplicated
/// case-insensitively with the first occurrence kept. Neither input is
/// modified.
pub fn merge(
    aggregate: &ExtractedIntelligence,
    increment: &ExtractedIntelligence,
) -> ExtractedIntelligence {
    ExtractedIntelligence {
        bank_accounts: union(&aggregate.bank_accounts, &increment.bank_accounts),
        upi_ids: union(&aggregate.upi_ids, &increment.upi_ids),
        phishing_links: union(&aggregate.phishing_links, &increment.phishing_links),
        phone_numbers: union(&aggregate.phone_numbers, &increment.phone_numbers),
        email_addresses: union(&aggregate.email_addresses, &increment.email_addresses),
        case_ids: union(&aggregate.case_ids, &increment.case_ids),
        policy_numbers: union(&aggregate.policy_numbers, &increment.policy_numbers),
        order_numbers: union(&aggregate.order_numbers, &increment.order_numbers),
        suspicious_keywords: union(&aggregate.suspicious_keywords, &increment.suspicious_keywords),
    }
}

fn union(a: &[String], b: &[String]) -> Vec<String> {
    dedup_case_insensitive(a.iter().chain(b).cloned())
}
