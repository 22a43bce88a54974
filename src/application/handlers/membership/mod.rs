//! Membership handlers.
//!
//! ## Commands
//! - Registering with a parking number (collects the membership fee)
//! - Recording an entry
//! - Settling the exit fee
//!
//! ## Queries
//! - Membership status
//! - Parking-number authentication
//! - Entry time
//! - Exit fee preview

mod authenticate_user;
mod check_user;
mod get_entry;
mod payments;
mod quote_exit_fee;
mod record_entry;
mod register_user;
mod settle_exit_fee;

#[cfg(test)]
pub(crate) mod test_support;

// Commands
pub use record_entry::{RecordEntryCommand, RecordEntryHandler, RecordEntryResult};
pub use register_user::{RegisterUserCommand, RegisterUserHandler, RegisterUserResult};
pub use settle_exit_fee::{SettleExitFeeCommand, SettleExitFeeHandler, SettleExitFeeResult};

// Queries
pub use authenticate_user::{
    AuthenticateUserHandler, AuthenticateUserQuery, AuthenticateUserResult,
};
pub use check_user::{CheckUserHandler, CheckUserQuery, CheckUserResult};
pub use get_entry::{GetEntryHandler, GetEntryQuery, GetEntryResult};
pub use quote_exit_fee::{QuoteExitFeeHandler, QuoteExitFeeQuery, QuoteExitFeeResult};
