//! Scam category labelling by keyword scoring.

use serde::{Deserialize, Serialize};

use crate::types::HistoryLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScamType {
    BankFraud,
    UpiFraud,
    Phishing,
    KycFraud,
    LotteryScam,
    JobScam,
    TechSupport,
    InvestmentScam,
    Unknown,
}

impl ScamType {
    /// Scored categories, in tie-break order.
    const SCORED: [ScamType; 8] = [
        ScamType::BankFraud,
        ScamType::UpiFraud,
        ScamType::Phishing,
        ScamType::KycFraud,
        ScamType::LotteryScam,
        ScamType::JobScam,
        ScamType::TechSupport,
        ScamType::InvestmentScam,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScamType::BankFraud => "bank_fraud",
            ScamType::UpiFraud => "upi_fraud",
            ScamType::Phishing => "phishing",
            ScamType::KycFraud => "kyc_fraud",
            ScamType::LotteryScam => "lottery_scam",
            ScamType::JobScam => "job_scam",
            ScamType::TechSupport => "tech_support",
            ScamType::InvestmentScam => "investment_scam",
            ScamType::Unknown => "unknown",
        }
    }

    fn terms(self) -> &'static [&'static str] {
        match self {
            ScamType::BankFraud => &[
                "bank", "account", "sbi", "hdfc", "icici", "axis", "kotak", "blocked", "suspended",
                "debit card", "credit card", "atm", "net banking", "a/c",
            ],
            ScamType::UpiFraud => &[
                "upi", "paytm", "gpay", "google pay", "phonepe", "bhim", "cashback", "collect request",
                "qr", "scan",
            ],
            ScamType::Phishing => &["link", "click", "http", "https", "www", "login", "website", "verify here"],
            ScamType::KycFraud => &["kyc", "aadhaar", "aadhar", "pan card", "pan", "update details"],
            ScamType::LotteryScam => &[
                "lottery", "prize", "won", "winner", "jackpot", "lucky draw", "reward", "gift",
            ],
            ScamType::JobScam => &[
                "job", "hiring", "work from home", "part time", "part-time", "salary", "task",
                "recruitment",
            ],
            ScamType::TechSupport => &[
                "anydesk", "teamviewer", "quicksupport", "virus", "remote", "technician", "refund",
                "microsoft",
            ],
            ScamType::InvestmentScam => &[
                "invest", "investment", "returns", "trading", "crypto", "bitcoin", "stock", "profit",
            ],
            ScamType::Unknown => &[],
        }
    }
}

impl std::fmt::Display for ScamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label the conversation by the category whose vocabulary scores highest.
///
/// Ties resolve in category order; no hits at all gives `Unknown`.
pub fn detect_scam_type(text: &str, history: &[HistoryLine]) -> ScamType {
    let mut corpus = text.to_lowercase();
    for line in history {
        corpus.push('\n');
        corpus.push_str(&line.text.to_lowercase());
    }

    let mut best = (ScamType::Unknown, 0usize);
    for kind in ScamType::SCORED {
        let score = kind
            .terms()
            .iter()
            .filter(|term| contains_term(&corpus, term))
            .count();
        if score > best.1 {
            best = (kind, score);
        }
    }
    best.0
}

/// Whole-word containment: `term` must not be flanked by letters or digits.
pub(crate) fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.match_indices(term).any(|(start, _)| {
        let end = start + term.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
