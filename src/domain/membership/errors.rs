//! Membership-specific error types.
//!
//! Errors related to registration, parking entries and fee collection.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | AlreadyRegistered | 409 |
//! | NotRegistered | 404 |
//! | NoActiveEntry | 409 |
//! | PaymentFailed | 402 |
//! | FeeOverflow | 422 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use std::fmt;

use crate::domain::foundation::{AccountId, DomainError, ErrorCode, ValidationError};

/// Why a token pull was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentFailureKind {
    /// The payer has not approved the registry for the amount.
    InsufficientAllowance,

    /// The payer does not hold the amount.
    InsufficientBalance,

    /// The token rejected the transfer for another reason.
    Other,
}

impl fmt::Display for PaymentFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentFailureKind::InsufficientAllowance => "insufficient_allowance",
            PaymentFailureKind::InsufficientBalance => "insufficient_balance",
            PaymentFailureKind::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// Account already holds a membership.
    AlreadyRegistered(AccountId),

    /// Account has never registered.
    NotRegistered(AccountId),

    /// Account has no entry timestamp to bill against.
    NoActiveEntry(AccountId),

    /// Token transfer was refused.
    PaymentFailed {
        kind: PaymentFailureKind,
        reason: String,
    },

    /// Computed fee exceeds the representable token amount.
    FeeOverflow { intervals: u64 },

    /// Validation failed.
    ValidationFailed {
        field: String,
        message: String,
    },

    /// Infrastructure error.
    Infrastructure(String),
}

impl MembershipError {
    pub fn already_registered(account: AccountId) -> Self {
        MembershipError::AlreadyRegistered(account)
    }

    pub fn not_registered(account: AccountId) -> Self {
        MembershipError::NotRegistered(account)
    }

    pub fn no_active_entry(account: AccountId) -> Self {
        MembershipError::NoActiveEntry(account)
    }

    pub fn payment_failed(kind: PaymentFailureKind, reason: impl Into<String>) -> Self {
        MembershipError::PaymentFailed {
            kind,
            reason: reason.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::AlreadyRegistered(_) => ErrorCode::AlreadyRegistered,
            MembershipError::NotRegistered(_) => ErrorCode::NotRegistered,
            MembershipError::NoActiveEntry(_) => ErrorCode::NoActiveEntry,
            MembershipError::PaymentFailed { .. } => ErrorCode::PaymentFailed,
            MembershipError::FeeOverflow { .. } => ErrorCode::FeeOverflow,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::AlreadyRegistered(account) => {
                format!("Account {} is already registered", account)
            }
            MembershipError::NotRegistered(account) => {
                format!("Account {} is not registered", account)
            }
            MembershipError::NoActiveEntry(account) => {
                format!("Account {} has no recorded entry", account)
            }
            MembershipError::PaymentFailed { kind, reason } => {
                format!("Payment failed ({}): {}", kind, reason)
            }
            MembershipError::FeeOverflow { intervals } => {
                format!("Fee for {} intervals exceeds the token range", intervals)
            }
            MembershipError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    ///
    /// Allowance and balance shortfalls need action from the payer first.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MembershipError::Infrastructure(_)
                | MembershipError::PaymentFailed {
                    kind: PaymentFailureKind::Other,
                    ..
                }
        )
    }
}

impl fmt::Display for MembershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<ValidationError> for MembershipError {
    fn from(err: ValidationError) -> Self {
        MembershipError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::PaymentFailed => MembershipError::PaymentFailed {
                kind: PaymentFailureKind::Other,
                reason: err.message,
            },
            ErrorCode::ValidationFailed => MembershipError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> AccountId {
        AccountId::new("0xdriver").unwrap()
    }

    #[test]
    fn constructors_map_to_codes() {
        assert_eq!(
            MembershipError::already_registered(account()).code(),
            ErrorCode::AlreadyRegistered
        );
        assert_eq!(
            MembershipError::not_registered(account()).code(),
            ErrorCode::NotRegistered
        );
        assert_eq!(
            MembershipError::no_active_entry(account()).code(),
            ErrorCode::NoActiveEntry
        );
        assert_eq!(
            MembershipError::payment_failed(PaymentFailureKind::InsufficientBalance, "empty")
                .code(),
            ErrorCode::PaymentFailed
        );
        assert_eq!(
            MembershipError::FeeOverflow { intervals: 1 }.code(),
            ErrorCode::FeeOverflow
        );
        assert_eq!(
            MembershipError::validation("parking_number", "zero").code(),
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            MembershipError::infrastructure("down").code(),
            ErrorCode::DatabaseError
        );
    }

    #[test]
    fn messages_include_the_account() {
        let err = MembershipError::not_registered(account());
        assert!(err.message().contains("0xdriver"));
    }

    #[test]
    fn payment_message_includes_kind_and_reason() {
        let err = MembershipError::payment_failed(
            PaymentFailureKind::InsufficientAllowance,
            "approved 5, needed 10",
        );
        let msg = err.message();
        assert!(msg.contains("insufficient_allowance"));
        assert!(msg.contains("approved 5, needed 10"));
    }

    #[test]
    fn only_transient_failures_are_retryable() {
        assert!(MembershipError::infrastructure("timeout").is_retryable());
        assert!(MembershipError::payment_failed(PaymentFailureKind::Other, "rpc").is_retryable());
        assert!(
            !MembershipError::payment_failed(PaymentFailureKind::InsufficientAllowance, "")
                .is_retryable()
        );
        assert!(!MembershipError::already_registered(account()).is_retryable());
    }

    #[test]
    fn display_matches_message() {
        let err = MembershipError::no_active_entry(account());
        assert_eq!(format!("{}", err), err.message());
    }

    #[test]
    fn converts_from_validation_error() {
        let err: MembershipError = ValidationError::not_positive("parking_number").into();
        assert!(matches!(
            err,
            MembershipError::ValidationFailed { ref field, .. } if field == "parking_number"
        ));
    }

    #[test]
    fn round_trips_through_domain_error() {
        let domain_err: DomainError = MembershipError::validation("account", "empty").into();
        assert_eq!(domain_err.code, ErrorCode::ValidationFailed);

        let back: MembershipError = DomainError::validation("account", "empty").into();
        assert!(matches!(
            back,
            MembershipError::ValidationFailed { ref field, .. } if field == "account"
        ));
    }

    #[test]
    fn unknown_domain_codes_become_infrastructure() {
        let err: MembershipError = DomainError::new(ErrorCode::InternalError, "boom").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
