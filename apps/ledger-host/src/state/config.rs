//! # Configuration State
//!
//! Stores host configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`LEDGER_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use ledger_core::calc::to_fixed;
use serde::{Deserialize, Serialize};

/// Host configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Start (and reset) from the demo ledger instead of empty collections
    pub seed_demo_data: bool,

    /// Currency symbol placed before formatted amounts
    pub currency_symbol: String,

    /// Fractional digits shown by [`ConfigState::format_amount`]
    pub display_decimals: usize,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Empty ledger on startup
    /// - No currency symbol
    /// - 2 display decimals (same as stored percentage totals)
    fn default() -> Self {
        ConfigState {
            seed_demo_data: false,
            currency_symbol: String::new(),
            display_decimals: ledger_core::TOTAL_DECIMALS,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `LEDGER_SEED_DEMO`: `1`, `true`, `yes` or `on` seeds the demo ledger
    /// - `LEDGER_CURRENCY_SYMBOL`: Override currency symbol
    /// - `LEDGER_DISPLAY_DECIMALS`: Override display decimals (e.g., "3")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(flag) = lookup("LEDGER_SEED_DEMO") {
            config.seed_demo_data = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if let Some(symbol) = lookup("LEDGER_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("LEDGER_DISPLAY_DECIMALS") {
            match decimals.trim().parse::<usize>() {
                Ok(decimals) => config.display_decimals = decimals,
                Err(_) => {
                    tracing::warn!(value = %decimals, "Ignoring invalid LEDGER_DISPLAY_DECIMALS")
                }
            }
        }

        config
    }

    /// Formats an amount for display.
    ///
    /// Rounds the way stored totals are rounded, then places the sign
    /// before the symbol.
    ///
    /// ## Example
    /// ```rust
    /// use ledger_host::state::ConfigState;
    ///
    /// let config = ConfigState {
    ///     currency_symbol: "₹".to_string(),
    ///     ..ConfigState::default()
    /// };
    /// assert_eq!(config.format_amount(3.6), "₹3.60");
    /// assert_eq!(config.format_amount(-12.346), "-₹12.35");
    /// ```
    pub fn format_amount(&self, value: f64) -> String {
        let fixed = to_fixed(value, self.display_decimals);
        match fixed.strip_prefix('-') {
            Some(magnitude) => format!("-{}{}", self.currency_symbol, magnitude),
            None => format!("{}{}", self.currency_symbol, fixed),
        }
    }
}
