//! Registry configuration

use serde::Deserialize;

use crate::domain::foundation::TokenAmount;
use crate::domain::membership::{
    FeeSchedule, ReRegistrationPolicy, SettlementPolicy, DEFAULT_GRACE_PERIOD_SECS,
    DEFAULT_INTERVAL_SECS,
};

use super::error::ValidationError;

/// Largest decimals value whose scale factor fits in a token amount.
const MAX_TOKEN_DECIMALS: u8 = 38;

/// Registry configuration (accounts, fee token, fee schedule, policies)
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Account that receives fees
    #[serde(default = "default_registry_account")]
    pub registry_account: String,

    /// Account allowed to mint the in-memory fee token
    #[serde(default = "default_minter_account")]
    pub minter_account: String,

    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,

    #[serde(default = "default_token_decimals")]
    pub token_decimals: u8,

    /// Membership fee in base units
    #[serde(default = "default_membership_fee")]
    pub membership_fee: u64,

    #[serde(default = "default_grace_period")]
    pub grace_period_secs: u64,

    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Charge per completed interval
    #[serde(default = "default_rate")]
    pub rate_per_interval: u64,

    /// Read `rate_per_interval` as whole tokens instead of base units
    #[serde(default)]
    pub rate_in_whole_tokens: bool,

    #[serde(default)]
    pub re_registration: ReRegistrationPolicy,

    #[serde(default)]
    pub settlement: SettlementPolicy,

    /// Comma-separated accounts funded at startup (in-memory token only)
    pub seed_accounts: Option<String>,

    /// Whole tokens minted to each seed account
    #[serde(default = "default_seed_balance")]
    pub seed_balance_whole_tokens: u64,
}

impl RegistryConfig {
    /// Rate per interval in base units.
    pub fn rate_base_units(&self) -> Result<TokenAmount, ValidationError> {
        if !self.rate_in_whole_tokens {
            return Ok(TokenAmount::from(self.rate_per_interval));
        }
        TokenAmount::from_whole_tokens(u128::from(self.rate_per_interval), self.token_decimals)
            .ok_or(ValidationError::RateOverflow(self.rate_per_interval))
    }

    /// Builds the fee schedule described by this configuration.
    pub fn fee_schedule(&self) -> Result<FeeSchedule, ValidationError> {
        FeeSchedule::new(
            TokenAmount::from(self.membership_fee),
            self.grace_period_secs,
            self.interval_secs,
            self.rate_base_units()?,
        )
        .map_err(|_| ValidationError::InvalidInterval)
    }

    /// Balance minted to each seed account, in base units.
    pub fn seed_balance(&self) -> Option<TokenAmount> {
        TokenAmount::from_whole_tokens(
            u128::from(self.seed_balance_whole_tokens),
            self.token_decimals,
        )
    }

    /// Get seed accounts as a vector
    pub fn seed_accounts_list(&self) -> Vec<String> {
        self.seed_accounts
            .as_ref()
            .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default()
    }

    /// Validate registry configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.registry_account.trim().is_empty() {
            return Err(ValidationError::MissingRequired("REGISTRY_ACCOUNT"));
        }
        if self.minter_account.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MINTER_ACCOUNT"));
        }
        if self.token_decimals > MAX_TOKEN_DECIMALS {
            return Err(ValidationError::TooManyDecimals {
                max: MAX_TOKEN_DECIMALS,
            });
        }
        if self.seed_accounts_list().iter().any(|a| a.is_empty()) {
            return Err(ValidationError::InvalidSeedAccount);
        }
        self.fee_schedule()?;
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            registry_account: default_registry_account(),
            minter_account: default_minter_account(),
            token_symbol: default_token_symbol(),
            token_decimals: default_token_decimals(),
            membership_fee: default_membership_fee(),
            grace_period_secs: default_grace_period(),
            interval_secs: default_interval(),
            rate_per_interval: default_rate(),
            rate_in_whole_tokens: false,
            re_registration: ReRegistrationPolicy::default(),
            settlement: SettlementPolicy::default(),
            seed_accounts: None,
            seed_balance_whole_tokens: default_seed_balance(),
        }
    }
}

fn default_registry_account() -> String {
    "parking-registry".to_string()
}

fn default_minter_account() -> String {
    "token-owner".to_string()
}

fn default_token_symbol() -> String {
    "PARK".to_string()
}

fn default_token_decimals() -> u8 {
    18
}

fn default_membership_fee() -> u64 {
    10
}

fn default_grace_period() -> u64 {
    DEFAULT_GRACE_PERIOD_SECS
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_rate() -> u64 {
    1000
}

fn default_seed_balance() -> u64 {
    1_000_000
}
