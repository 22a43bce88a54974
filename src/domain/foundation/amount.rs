//! Token amount value object.
//!
//! Every amount in the system (fees, rates, balances, allowances) is a count
//! of token base units. Whole-token values are converted explicitly through
//! [`TokenAmount::from_whole_tokens`] so no code silently mixes the two scales.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative quantity of token base units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: TokenAmount = TokenAmount(0);
    pub const MAX: TokenAmount = TokenAmount(u128::MAX);

    /// Creates an amount from raw base units.
    pub const fn from_base_units(units: u128) -> Self {
        Self(units)
    }

    /// Converts a whole-token count into base units for a token with
    /// `decimals` fractional digits.
    ///
    /// Returns `None` on overflow.
    pub fn from_whole_tokens(tokens: u128, decimals: u8) -> Option<Self> {
        10u128
            .checked_pow(u32::from(decimals))
            .and_then(|scale| tokens.checked_mul(scale))
            .map(Self)
    }

    /// Returns the raw base-unit count.
    pub const fn base_units(&self) -> u128 {
        self.0
    }

    /// True for the zero amount.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: TokenAmount) -> Option<TokenAmount> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: TokenAmount) -> Option<TokenAmount> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Multiplies by a plain count (e.g. a number of billing intervals).
    pub fn checked_mul(self, factor: u64) -> Option<TokenAmount> {
        self.0.checked_mul(u128::from(factor)).map(Self)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TokenAmount {
    fn from(units: u64) -> Self {
        Self(u128::from(units))
    }
}
