// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuotaError {
    // configuration
    #[error("missing authorization token (set AUTH_TOKEN or pass --auth)")]
    MissingToken,
    #[error("unknown VIP tier: {0}")]
    InvalidTier(u8),
    #[error("invalid VIP level {0:?}: expected a small positive integer")]
    InvalidVipLevel(String),
    #[error("unable to load timezone {0:?}")]
    InvalidTimezone(String),

    // deposit source
    #[error("{reason} (code {code})")]
    Source { code: i64, reason: &'static str },
    #[error("unknown code: {code} ({message})")]
    UnknownCode { code: i64, message: String },

    // amounts
    #[error("amount cannot be represented exactly: {0}")]
    Inexact(String),

    // transport / decode
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuotaError>;
