//! Exit fee schedule.
//!
//! The fee for a stay of `duration` seconds is
//!
//! ```text
//! billable  = max(0, duration - grace_period)
//! intervals = floor(billable / interval)
//! fee       = intervals * rate_per_interval
//! ```
//!
//! Partial intervals are never charged, so a stay of grace + 1s is free.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TokenAmount, ValidationError};

use super::MembershipError;

/// One-time registration fee, in token base units.
pub const DEFAULT_MEMBERSHIP_FEE: u128 = 10;

/// Free parking time before billing starts (3 hours).
pub const DEFAULT_GRACE_PERIOD_SECS: u64 = 3 * 60 * 60;

/// Billing granularity after the grace period (10 minutes).
pub const DEFAULT_INTERVAL_SECS: u64 = 10 * 60;

/// Charge per completed interval, in token base units.
pub const DEFAULT_RATE_PER_INTERVAL: u128 = 1000;

/// Fee parameters for a single parking lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    membership_fee: TokenAmount,
    grace_period_secs: u64,
    interval_secs: u64,
    rate_per_interval: TokenAmount,
}

impl FeeSchedule {
    /// Builds a schedule, rejecting a zero-length billing interval.
    pub fn new(
        membership_fee: TokenAmount,
        grace_period_secs: u64,
        interval_secs: u64,
        rate_per_interval: TokenAmount,
    ) -> Result<Self, ValidationError> {
        if interval_secs == 0 {
            return Err(ValidationError::not_positive("interval_secs"));
        }
        Ok(Self {
            membership_fee,
            grace_period_secs,
            interval_secs,
            rate_per_interval,
        })
    }

    pub fn membership_fee(&self) -> TokenAmount {
        self.membership_fee
    }

    pub fn grace_period_secs(&self) -> u64 {
        self.grace_period_secs
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    pub fn rate_per_interval(&self) -> TokenAmount {
        self.rate_per_interval
    }

    /// Computes the exit fee for a stay of `duration_secs`.
    ///
    /// # Errors
    ///
    /// `FeeOverflow` if `intervals * rate` does not fit in a token amount.
    pub fn quote(&self, duration_secs: u64) -> Result<FeeQuote, MembershipError> {
        let billable_secs = duration_secs.saturating_sub(self.grace_period_secs);
        let intervals = billable_secs / self.interval_secs;
        let fee = self
            .rate_per_interval
            .checked_mul(intervals)
            .ok_or(MembershipError::FeeOverflow { intervals })?;

        Ok(FeeQuote {
            duration_secs,
            billable_secs,
            intervals,
            fee,
        })
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            membership_fee: TokenAmount::from_base_units(DEFAULT_MEMBERSHIP_FEE),
            grace_period_secs: DEFAULT_GRACE_PERIOD_SECS,
            interval_secs: DEFAULT_INTERVAL_SECS,
            rate_per_interval: TokenAmount::from_base_units(DEFAULT_RATE_PER_INTERVAL),
        }
    }
}

/// Breakdown of an exit fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    /// Total time parked.
    pub duration_secs: u64,

    /// Time parked beyond the grace period.
    pub billable_secs: u64,

    /// Completed billing intervals within the billable time.
    pub intervals: u64,

    /// Amount owed, in token base units.
    pub fee: TokenAmount,
}
