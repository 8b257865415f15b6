// src/models.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Lifecycle state of a deposit as reported by the wallet API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositStatus {
    Success,
    Refunded,
    Pending,
    #[serde(other)]
    Other,
}

/// One completed transfer into the wallet
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DepositRecord {
    #[serde(default)]
    pub order_id: String,

    #[serde(rename = "coin")]
    pub asset: String,

    pub status: DepositStatus,

    #[serde(rename = "complete_time")]
    pub completed_at: i64, // epoch millis, anchor for window membership

    #[serde(rename = "twd_amount", deserialize_with = "exact_decimal")]
    pub amount: Decimal, // quota unit currency, exact
}

// Refuses amounts that would need rounding to fit
fn exact_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Decimal::from_str_exact(raw.trim()).map_err(serde::de::Error::custom)
}

impl DepositRecord {
    pub fn is_eligible(&self, target_asset: &str) -> bool {
        self.asset == target_asset && self.status == DepositStatus::Success
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DepositData {
    #[serde(default)]
    pub records: Vec<DepositRecord>,
}

/// Envelope returned by `GET /wallet-api/v1/kgi/deposits`
#[derive(Debug, Deserialize)]
pub struct DepositRecordResp {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<DepositData>,
}
