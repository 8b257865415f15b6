// src/config.rs
use chrono_tz::Tz;
use clap::Args;
use dotenvy::dotenv;
use std::fmt;
use tracing::info;

use crate::aggregator::{TierCeilings, VipQuotaTable};
use crate::client::DEFAULT_DEPOSITS_URL;
use crate::error::{QuotaError, Result};

pub const DEFAULT_ASSET: &str = "USDT";
pub const DEFAULT_TIMEZONE: &str = "Asia/Taipei";

/// Flags for `rqt quota`; each one falls back to its env variable
#[derive(Debug, Clone, Args)]
pub struct QuotaArgs {
    /// authorization token (Bearer ...)
    #[arg(long = "auth", env = "AUTH_TOKEN", hide_env_values = true)]
    pub auth: Option<String>,

    /// VIP level (1, 2, 3, 4)
    #[arg(long = "vip", env = "VIP_LEVEL")]
    pub vip: Option<String>,

    /// asset whose deposits count toward the quota
    #[arg(long = "asset", env = "TARGET_ASSET", default_value = DEFAULT_ASSET)]
    pub asset: String,

    /// timezone used to display unlock times
    #[arg(long = "tz", env = "TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// deposit history endpoint
    #[arg(long = "api-url", env = "WALLET_API_URL", default_value = DEFAULT_DEPOSITS_URL)]
    pub api_url: String,
}

#[derive(Clone)]
pub struct Config {
    pub authorization: String,
    pub vip_level: u8,
    pub ceilings: TierCeilings,
    pub target_asset: String,
    pub timezone: Tz,
    pub api_url: String,
}

// keep the token out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("authorization", &"<redacted>")
            .field("vip_level", &self.vip_level)
            .field("ceilings", &self.ceilings)
            .field("target_asset", &self.target_asset)
            .field("timezone", &self.timezone)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Load `.env` into the process env so clap's `env` fallbacks see it
pub fn load_dotenv() {
    dotenv().ok();
}

/// Strip pasted newlines and surrounding spaces from a token
pub fn sanitize_token(raw: &str) -> String {
    raw.replace('\n', "").trim_matches(' ').to_string()
}

pub fn parse_vip_level(raw: &str) -> Result<u8> {
    raw.trim()
        .parse::<u8>()
        .map_err(|_| QuotaError::InvalidVipLevel(raw.to_string()))
}

pub fn parse_timezone(raw: &str) -> Result<Tz> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|_| QuotaError::InvalidTimezone(raw.to_string()))
}

/// Validate flags against the tier table. Runs before any network call.
pub fn load(args: QuotaArgs, table: &VipQuotaTable) -> Result<Config> {
    let authorization = sanitize_token(args.auth.as_deref().unwrap_or_default());
    if authorization.is_empty() {
        return Err(QuotaError::MissingToken);
    }

    let vip_level = parse_vip_level(args.vip.as_deref().unwrap_or_default())?;
    let ceilings = table.ceilings(vip_level)?;
    let timezone = parse_timezone(&args.timezone)?;

    let cfg = Config {
        authorization,
        vip_level,
        ceilings,
        target_asset: args.asset.trim().to_string(),
        timezone,
        api_url: args.api_url,
    };

    info!("Loaded config: {:?}", cfg);

    Ok(cfg)
}
