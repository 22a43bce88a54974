//! Payment token port.
//!
//! The registry collects fees in a fungible token it does not own. This
//! port is the slice of an ERC-20 style ledger the registry needs: pull on
//! behalf of a payer, push for refunds, and balance/allowance queries.
//!
//! Minting and approvals are setup concerns and live on the adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{AccountId, TokenAmount};
use crate::domain::membership::{MembershipError, PaymentFailureKind};

/// Errors returned by a payment token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("allowance {available} is below the required {needed}")]
    InsufficientAllowance {
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("balance {available} is below the required {needed}")]
    InsufficientBalance {
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("account {0} is not allowed to mint")]
    NotMinter(AccountId),

    #[error("token amount overflow")]
    Overflow,

    #[error("token ledger unavailable: {0}")]
    Unavailable(String),
}

impl From<TokenError> for MembershipError {
    fn from(err: TokenError) -> Self {
        let kind = match err {
            TokenError::InsufficientAllowance { .. } => PaymentFailureKind::InsufficientAllowance,
            TokenError::InsufficientBalance { .. } => PaymentFailureKind::InsufficientBalance,
            _ => PaymentFailureKind::Other,
        };
        MembershipError::payment_failed(kind, err.to_string())
    }
}

/// Port for the fee token.
///
/// Implementations must ensure:
/// - `transfer_from` checks allowance before balance and changes nothing on failure
/// - a successful `transfer_from` decrements the allowance by `amount`
#[async_trait]
pub trait PaymentToken: Send + Sync {
    /// Moves `amount` from `from` to `to`, spending `spender`'s allowance.
    async fn transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), TokenError>;

    /// Moves `amount` from `from` to `to` on `from`'s own authority.
    async fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), TokenError>;

    /// Balance held by `account`.
    async fn balance_of(&self, account: &AccountId) -> Result<TokenAmount, TokenError>;

    /// Amount `spender` may still pull from `owner`.
    async fn allowance(
        &self,
        owner: &AccountId,
        spender: &AccountId,
    ) -> Result<TokenAmount, TokenError>;
}
