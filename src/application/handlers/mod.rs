//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod membership;

pub use membership::{
    AuthenticateUserHandler, AuthenticateUserQuery, AuthenticateUserResult, CheckUserHandler,
    CheckUserQuery, CheckUserResult, GetEntryHandler, GetEntryQuery, GetEntryResult,
    QuoteExitFeeHandler, QuoteExitFeeQuery, QuoteExitFeeResult, RecordEntryCommand,
    RecordEntryHandler, RecordEntryResult, RegisterUserCommand, RegisterUserHandler,
    RegisterUserResult, SettleExitFeeCommand, SettleExitFeeHandler, SettleExitFeeResult,
};
