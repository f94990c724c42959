//! The entity bag shared by per-message extraction and the conversation aggregate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Fields the scoring endpoint checks by substring containment.
pub const TRACKED_FIELDS: &[&str] = &[
    "bankAccounts",
    "upiIds",
    "phishingLinks",
    "phoneNumbers",
    "emailAddresses",
];

/// Intelligence extracted from one message or folded across a conversation.
///
/// Every list holds unique values under case-insensitive comparison, in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedIntelligence {
    pub bank_accounts: Vec<String>,
    pub upi_ids: Vec<String>,
    pub phishing_links: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub email_addresses: Vec<String>,
    pub case_ids: Vec<String>,
    pub policy_numbers: Vec<String>,
    pub order_numbers: Vec<String>,
    pub suspicious_keywords: Vec<String>,
}

impl ExtractedIntelligence {
    /// True when no field holds a value.
    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }

    /// True when any of the scored entity fields holds a value.
    ///
    /// Keywords and reference codes alone are not actionable.
    pub fn has_actionable(&self) -> bool {
        !(self.bank_accounts.is_empty()
            && self.upi_ids.is_empty()
            && self.phishing_links.is_empty()
            && self.phone_numbers.is_empty()
            && self.email_addresses.is_empty())
    }

    /// Total number of values across every field.
    pub fn total_items(&self) -> usize {
        self.fields().iter().map(|(_, values)| values.len()).sum()
    }

    /// Wire names of the tracked fields that are still empty.
    pub fn gaps(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(name, values)| TRACKED_FIELDS.contains(name) && values.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Merge `other` after `self`, returning a new value.
    pub fn merged(&self, other: &ExtractedIntelligence) -> ExtractedIntelligence {
        crate::merge::merge(self, other)
    }

    /// `(wire name, values)` for every field, in wire order.
    pub fn fields(&self) -> [(&'static str, &[String]); 9] {
        [
            ("bankAccounts", self.bank_accounts.as_slice()),
            ("upiIds", self.upi_ids.as_slice()),
            ("phishingLinks", self.phishing_links.as_slice()),
            ("phoneNumbers", self.phone_numbers.as_slice()),
            ("emailAddresses", self.email_addresses.as_slice()),
            ("caseIds", self.case_ids.as_slice()),
            ("policyNumbers", self.policy_numbers.as_slice()),
            ("orderNumbers", self.order_numbers.as_slice()),
            ("suspiciousKeywords", self.suspicious_keywords.as_slice()),
        ]
    }
}

/// Order-preserving, case-insensitive de-duplication. First occurrence wins.
pub(crate) fn dedup_case_insensitive<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if seen.insert(value.to_lowercase()) {
            out.push(value);
        }
    }
    out
}
