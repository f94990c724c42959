//! Honeypot Protocol: wire types, lenient request normalization, session
//! bookkeeping and scoring callbacks.

pub mod callback;
pub mod metrics;
pub mod normalize;
pub mod session;
pub mod types;

pub use callback::{should_send_callback, CallbackReporter, HttpCallbackReporter};
pub use metrics::engagement_metrics;
pub use normalize::normalize_request;
pub use session::{InMemorySessionStore, SessionState, SessionStore};
pub use types::*;
