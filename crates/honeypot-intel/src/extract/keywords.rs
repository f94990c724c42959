//! Fraud-indicator vocabulary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    Urgency,
    CredentialRequest,
    MonetaryLure,
    LegalThreat,
    TechInstall,
    Kyc,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 6] = [
        Self::Urgency,
        Self::CredentialRequest,
        Self::MonetaryLure,
        Self::LegalThreat,
        Self::TechInstall,
        Self::Kyc,
    ];

    /// Lowercase terms matched by substring containment.
    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            Self::Urgency => &[
                "urgent",
                "immediately",
                "right now",
                "act now",
                "hurry",
                "within 24 hours",
                "last chance",
                "expire",
                "blocked",
                "suspended",
                "deactivated",
                "frozen",
            ],
            Self::CredentialRequest => &[
                "otp",
                "upi pin",
                "atm pin",
                "mpin",
                "cvv",
                "password",
                "card number",
                "expiry date",
                "share the code",
                "verification code",
                "login details",
            ],
            Self::MonetaryLure => &[
                "lottery",
                "prize",
                "jackpot",
                "you have won",
                "cashback",
                "refund",
                "reward",
                "processing fee",
                "registration fee",
                "guaranteed returns",
                "double your money",
                "work from home",
            ],
            Self::LegalThreat => &[
                "arrest",
                "police",
                "legal action",
                "court",
                "warrant",
                "penalty",
                "money laundering",
                "customs",
                "cyber crime",
            ],
            Self::TechInstall => &[
                "anydesk",
                "teamviewer",
                "quicksupport",
                "screen share",
                "remote access",
                "download the app",
                "install",
                ".apk",
            ],
            Self::Kyc => &[
                "kyc",
                "aadhaar",
                "aadhar",
                "pan card",
                "update your details",
                "re-verify",
                "verify your account",
            ],
        }
    }
}

/// Vocabulary terms contained in `text`, in vocabulary order, each once.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();
    for category in KeywordCategory::ALL {
        for term in category.vocabulary() {
            if lower.contains(term) && !found.iter().any(|f| f == term) {
                found.push((*term).to_string());
            }
        }
    }
    found
}

/// Categories with at least one vocabulary hit.
pub fn categories_present(text: &str) -> Vec<KeywordCategory> {
    let lower = text.to_lowercase();
    KeywordCategory::ALL
        .into_iter()
        .filter(|c| c.vocabulary().iter().any(|term| lower.contains(term)))
        .collect()
}
