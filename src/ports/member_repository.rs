//! Member repository port.
//!
//! Defines the contract for persisting and retrieving member records.
//!
//! # Design
//!
//! - **Keyed by account**: at most one record per account
//! - **Insert vs update**: `save` refuses to overwrite, `update` refuses to create
//! - **No deletion**: records live for the lifetime of the registry

use crate::domain::foundation::{AccountId, DomainError};
use crate::domain::membership::MemberRecord;
use async_trait::async_trait;

/// Repository port for member record persistence.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// - `AlreadyRegistered` if the account already has a record
    /// - `DatabaseError` on persistence failure
    async fn save(&self, record: &MemberRecord) -> Result<(), DomainError>;

    /// Replace an existing record.
    ///
    /// # Errors
    ///
    /// - `NotRegistered` if the account has no record
    /// - `DatabaseError` on persistence failure
    async fn update(&self, record: &MemberRecord) -> Result<(), DomainError>;

    /// Find the record for an account.
    ///
    /// Returns `None` if the account never registered.
    async fn find_by_account(&self, account: &AccountId)
        -> Result<Option<MemberRecord>, DomainError>;

    /// Number of registered members.
    async fn count_registered(&self) -> Result<u64, DomainError>;
}
