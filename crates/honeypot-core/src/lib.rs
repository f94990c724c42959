//! Honeypot Core: configuration and shared error types.

pub mod config;
pub mod error;

pub use config::HoneypotConfig;
pub use error::{Error, Result};
