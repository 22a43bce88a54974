//! QuoteExitFeeHandler - Query handler previewing the exit fee.

use std::sync::Arc;

use crate::domain::foundation::{AccountId, Timestamp};
use crate::domain::membership::{FeeQuote, FeeSchedule, MembershipError};
use crate::ports::{Clock, MemberRepository};

#[derive(Debug, Clone)]
pub struct QuoteExitFeeQuery {
    pub caller: AccountId,
}

/// Fee the caller would pay if they settled now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteExitFeeResult {
    pub entered_at: Timestamp,
    pub quoted_at: Timestamp,
    pub quote: FeeQuote,
}

/// Handler for exit fee previews. Reads only; nothing is charged.
pub struct QuoteExitFeeHandler {
    repository: Arc<dyn MemberRepository>,
    clock: Arc<dyn Clock>,
    fee_schedule: FeeSchedule,
}

impl QuoteExitFeeHandler {
    pub fn new(
        repository: Arc<dyn MemberRepository>,
        clock: Arc<dyn Clock>,
        fee_schedule: FeeSchedule,
    ) -> Self {
        Self {
            repository,
            clock,
            fee_schedule,
        }
    }

    pub async fn handle(
        &self,
        query: QuoteExitFeeQuery,
    ) -> Result<QuoteExitFeeResult, MembershipError> {
        let record = self
            .repository
            .find_by_account(&query.caller)
            .await?
            .ok_or_else(|| MembershipError::not_registered(query.caller.clone()))?;

        let entered_at = record
            .entry()
            .ok_or_else(|| MembershipError::no_active_entry(query.caller.clone()))?;
        let quoted_at = self.clock.now();
        let duration = record.parked_seconds(quoted_at)?;

        Ok(QuoteExitFeeResult {
            entered_at,
            quoted_at,
            quote: self.fee_schedule.quote(duration)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::{account, units, Fixture};

    fn handler(fx: &Fixture) -> QuoteExitFeeHandler {
        QuoteExitFeeHandler::new(
            fx.repository.clone(),
            fx.clock.clone(),
            fx.settings.fee_schedule,
        )
    }

    fn query(who: &str) -> QuoteExitFeeQuery {
        QuoteExitFeeQuery {
            caller: account(who),
        }
    }

    #[tokio::test]
    async fn quotes_four_hour_stay() {
        let fx = Fixture::new();
        fx.seed_parked("alice", 4).await;

        let result = handler(&fx).handle(query("alice")).await.unwrap();

        assert_eq!(result.quote.duration_secs, 14_400);
        assert_eq!(result.quote.intervals, 6);
        assert_eq!(result.quote.fee, units(6_000));
    }

    #[tokio::test]
    async fn quoting_changes_nothing() {
        let fx = Fixture::new();
        let before = fx.seed_parked("alice", 4).await;

        handler(&fx).handle(query("alice")).await.unwrap();

        let after = fx
            .repository
            .find_by_account(&account("alice"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn member_without_entry_has_no_quote() {
        let fx = Fixture::new();
        fx.seed_member("alice", 1).await;

        let err = handler(&fx).handle(query("alice")).await.unwrap_err();
        assert!(matches!(err, MembershipError::NoActiveEntry(_)));
    }

    #[tokio::test]
    async fn unknown_caller_is_not_registered() {
        let fx = Fixture::new();
        let err = handler(&fx).handle(query("bob")).await.unwrap_err();
        assert!(matches!(err, MembershipError::NotRegistered(_)));
    }
}
