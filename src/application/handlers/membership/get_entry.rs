//! GetEntryHandler - Query handler for the caller's entry time.

use std::sync::Arc;

use crate::domain::foundation::{AccountId, Timestamp};
use crate::domain::membership::MembershipError;
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct GetEntryQuery {
    pub caller: AccountId,
}

/// `None` when no stay is open or the caller is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetEntryResult {
    pub entered_at: Option<Timestamp>,
}

pub struct GetEntryHandler {
    repository: Arc<dyn MemberRepository>,
}

impl GetEntryHandler {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetEntryQuery) -> Result<GetEntryResult, MembershipError> {
        let entered_at = self
            .repository
            .find_by_account(&query.caller)
            .await?
            .and_then(|record| record.entry());
        Ok(GetEntryResult { entered_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::{account, Fixture};

    async fn entry_of(fx: &Fixture, who: &str) -> Option<Timestamp> {
        GetEntryHandler::new(fx.repository.clone())
            .handle(GetEntryQuery {
                caller: account(who),
            })
            .await
            .unwrap()
            .entered_at
    }

    #[tokio::test]
    async fn unknown_caller_has_no_entry() {
        let fx = Fixture::new();
        assert_eq!(entry_of(&fx, "nobody").await, None);
    }

    #[tokio::test]
    async fn member_without_entry_has_none() {
        let fx = Fixture::new();
        fx.seed_member("alice", 1).await;
        assert_eq!(entry_of(&fx, "alice").await, None);
    }

    #[tokio::test]
    async fn parked_member_reads_back_entry() {
        let fx = Fixture::new();
        let record = fx.seed_parked("alice", 2).await;
        assert_eq!(entry_of(&fx, "alice").await, record.entry());
    }
}
