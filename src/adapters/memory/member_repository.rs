//! In-memory member repository.
//!
//! Backs the registry in development and tests. Records live for the
//! lifetime of the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{AccountId, DomainError, ErrorCode};
use crate::domain::membership::MemberRecord;
use crate::ports::MemberRepository;

/// In-memory storage for member records, keyed by account.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberRepository {
    records: Arc<RwLock<HashMap<AccountId, MemberRecord>>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (registered or not).
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn save(&self, record: &MemberRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.account) {
            return Err(DomainError::new(
                ErrorCode::AlreadyRegistered,
                format!("Record for {} already exists", record.account),
            ));
        }
        records.insert(record.account.clone(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &MemberRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(&record.account) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::NotRegistered,
                format!("No record for {}", record.account),
            )),
        }
    }

    async fn find_by_account(
        &self,
        account: &AccountId,
    ) -> Result<Option<MemberRecord>, DomainError> {
        Ok(self.records.read().await.get(account).cloned())
    }

    async fn count_registered(&self) -> Result<u64, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().filter(|r| r.is_registered()).count() as u64)
    }
}
