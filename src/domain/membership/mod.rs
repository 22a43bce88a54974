//! Membership domain module.
//!
//! Handles registration, parking-number authentication, entry recording
//! and the exit fee.
//!
//! # Module Structure
//!
//! - `record` - MemberRecord aggregate
//! - `status` - RegistrationStatus state machine
//! - `fee_schedule` - Grace period, interval and rate
//! - `policy` - Operator choices for re-registration and settlement
//! - `events` - Events published after each mutation

mod errors;
mod events;
mod fee_schedule;
mod policy;
mod record;
mod status;

pub use errors::{MembershipError, PaymentFailureKind};
pub use events::{EntryRecorded, ExitSettled, MemberRegistered};
pub use fee_schedule::{
    FeeQuote, FeeSchedule, DEFAULT_GRACE_PERIOD_SECS, DEFAULT_INTERVAL_SECS,
    DEFAULT_MEMBERSHIP_FEE, DEFAULT_RATE_PER_INTERVAL,
};
pub use policy::{ReRegistrationPolicy, SettlementPolicy};
pub use record::MemberRecord;
pub use status::RegistrationStatus;
