// src/client.rs
use reqwest::{header::AUTHORIZATION, Client};
use std::time::Duration;
use tracing::info;

use crate::error::{QuotaError, Result};
use crate::models::{DepositRecord, DepositRecordResp};

pub const DEFAULT_DEPOSITS_URL: &str = "https://www.rybit.com/wallet-api/v1/kgi/deposits";

/// Response codes the wallet API documents; anything else is unknown
fn known_code(code: i64) -> Option<Option<&'static str>> {
    match code {
        0 => Some(None),
        40101631 => Some(Some("empty token")),
        40101633 => Some(Some("invalid token")),
        _ => None,
    }
}

/// Map a decoded envelope to its records, or the fatal error its code stands for
pub fn into_records(resp: DepositRecordResp) -> Result<Vec<DepositRecord>> {
    match known_code(resp.code) {
        Some(None) => Ok(resp.data.unwrap_or_default().records),
        Some(Some(reason)) => Err(QuotaError::Source {
            code: resp.code,
            reason,
        }),
        None => Err(QuotaError::UnknownCode {
            code: resp.code,
            message: resp.message,
        }),
    }
}

/// Fetch one snapshot of the user's deposits. No retries: any failure is fatal.
pub async fn fetch_deposits(url: &str, authorization: &str) -> Result<Vec<DepositRecord>> {
    let client = Client::builder()
        .timeout(Duration::from_secs(15))
        .build()?;

    info!("📡 Fetching deposits → {}", url);

    let resp = client
        .get(url)
        .header(AUTHORIZATION, authorization)
        .send()
        .await?;
    let text = resp.text().await?;

    let parsed: DepositRecordResp = serde_json::from_str(&text)?;
    let records = into_records(parsed)?;
    info!("📩 Received {} deposit records", records.len());

    Ok(records)
}
