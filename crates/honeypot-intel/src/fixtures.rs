//! Scam message samples shared by tests.

pub const BANK_FRAUD: &str = "URGENT: Your SBI account has been compromised. Your account will be \
blocked in 2 hours. Call +91-9876543210 immediately and transfer the balance to safe account \
12345678901234 to avoid loss.";

pub const EMAIL_WITH_HYPHENATED_DOMAIN: &str = "email us at offers@fake-amazon-deals.com for help";

pub const MIXED_ENTITIES: &str = "Call me at +91-9876543210 and use UPI scammer.fraud@fakebank, \
account 1234567890123456, link https://secure-fakebank.com/verify";

pub const REFERENCE_CODES: &str = "Case REF-2026-001, policy POL-778899, order ORD-556677.";

pub const THREE_TURN_SCAM: [&str; 3] = [
    "Your SBI account is blocked, call +91-9876543210",
    "Account number 1234567890123456, pay to scammer.fraud@fakebank",
    "Click http://fake-site.com/claim?id=1",
];
