//! Ledger configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use quantumstock_core::{DomainError, DomainResult};

pub const ENV_VALIDATION: &str = "QUANTUMSTOCK_VALIDATION";
pub const ENV_RECENT_WINDOW_HOURS: &str = "QUANTUMSTOCK_RECENT_WINDOW_HOURS";
pub const ENV_TOP_MOVERS_LIMIT: &str = "QUANTUMSTOCK_TOP_MOVERS_LIMIT";

/// How much the ledger checks before mutating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Reject bad input at the boundary (blank fields, negative stock,
    /// inconsistent movement snapshots).
    #[default]
    Strict,
    /// Store whatever the caller passes; validation is the caller's job.
    Permissive,
}

impl core::str::FromStr for ValidationPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            other => Err(DomainError::validation(format!(
                "unknown validation policy '{other}' (expected strict or permissive)"
            ))),
        }
    }
}

/// Ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub validation: ValidationPolicy,
    /// Trailing window counted as "recent" on the dashboard.
    pub recent_window: Duration,
    /// Default size of the top-movers ranking.
    pub top_movers_limit: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::Strict,
            recent_window: Duration::hours(24),
            top_movers_limit: 5,
        }
    }
}

impl LedgerConfig {
    pub fn permissive() -> Self {
        Self::default().with_validation(ValidationPolicy::Permissive)
    }

    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_recent_window(mut self, window: Duration) -> Self {
        self.recent_window = window;
        self
    }

    pub fn with_top_movers_limit(mut self, limit: usize) -> Self {
        self.top_movers_limit = limit;
        self
    }

    /// Read overrides from the process environment; unset keys keep defaults.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LedgerConfig::from_env`] with an arbitrary key source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_VALIDATION) {
            config.validation = raw.parse()?;
        }

        if let Some(raw) = lookup(ENV_RECENT_WINDOW_HOURS) {
            let hours: i64 = raw.trim().parse().map_err(|_| {
                DomainError::validation(format!("invalid {ENV_RECENT_WINDOW_HOURS} value '{raw}'"))
            })?;
            if hours <= 0 {
                return Err(DomainError::validation(format!(
                    "{ENV_RECENT_WINDOW_HOURS} must be positive"
                )));
            }
            config = config.with_recent_window(Duration::hours(hours));
        }

        if let Some(raw) = lookup(ENV_TOP_MOVERS_LIMIT) {
            config.top_movers_limit = raw.trim().parse().map_err(|_| {
                DomainError::validation(format!("invalid {ENV_TOP_MOVERS_LIMIT} value '{raw}'"))
            })?;
        }

        Ok(config)
    }
}
