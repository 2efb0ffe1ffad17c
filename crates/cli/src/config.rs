//! Process configuration for the `quantumstock` binary.

use tracing::warn;

use quantumstock_auth::DEMO_PASSWORD;
use quantumstock_inventory::LedgerConfig;

pub const ENV_EMAIL: &str = "QUANTUMSTOCK_EMAIL";
pub const ENV_PASSWORD: &str = "QUANTUMSTOCK_PASSWORD";

const DEFAULT_EMAIL: &str = "clerk@quantumstock.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub email: String,
    pub password: String,
    pub ledger: LedgerConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let email = lookup(ENV_EMAIL).unwrap_or_else(|| {
            warn!("{ENV_EMAIL} not set; signing in as the demo warehouse clerk");
            DEFAULT_EMAIL.to_string()
        });
        let password = lookup(ENV_PASSWORD).unwrap_or_else(|| DEMO_PASSWORD.to_string());
        let ledger = LedgerConfig::from_lookup(&lookup)?;

        Ok(Self {
            email,
            password,
            ledger,
        })
    }
}
