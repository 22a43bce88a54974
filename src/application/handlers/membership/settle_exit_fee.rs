//! SettleExitFeeHandler - Command handler collecting the exit fee.

use std::sync::Arc;
use tracing::info;

use crate::application::RegistrySettings;
use crate::domain::foundation::{AccountId, EventId, Timestamp};
use crate::domain::membership::{ExitSettled, FeeQuote, MemberRecord, MembershipError};
use crate::ports::{Clock, EventPublisher, MemberRepository, PaymentToken};

use super::payments::{collect_fee, publish_event, refund_fee};

/// Command to settle the caller's open stay.
#[derive(Debug, Clone)]
pub struct SettleExitFeeCommand {
    pub caller: AccountId,
}

/// Result of a successful settlement.
#[derive(Debug, Clone)]
pub struct SettleExitFeeResult {
    pub entered_at: Timestamp,
    pub settled_at: Timestamp,
    pub quote: FeeQuote,
    pub record: MemberRecord,
    pub event: ExitSettled,
}

/// Handler for exit fee settlement.
///
/// Duration runs from the recorded entry to the clock's current time. The
/// fee is pulled before the record is updated; a zero fee pulls nothing.
pub struct SettleExitFeeHandler {
    repository: Arc<dyn MemberRepository>,
    token: Arc<dyn PaymentToken>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
    settings: RegistrySettings,
}

impl SettleExitFeeHandler {
    pub fn new(
        repository: Arc<dyn MemberRepository>,
        token: Arc<dyn PaymentToken>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
        settings: RegistrySettings,
    ) -> Self {
        Self {
            repository,
            token,
            clock,
            event_publisher,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: SettleExitFeeCommand,
    ) -> Result<SettleExitFeeResult, MembershipError> {
        let mut record = self
            .repository
            .find_by_account(&cmd.caller)
            .await?
            .ok_or_else(|| MembershipError::not_registered(cmd.caller.clone()))?;

        let entered_at = record
            .entry()
            .ok_or_else(|| MembershipError::no_active_entry(cmd.caller.clone()))?;
        let settled_at = self.clock.now();
        let quote = self
            .settings
            .fee_schedule
            .quote(record.parked_seconds(settled_at)?)?;

        let registry = &self.settings.registry_account;
        collect_fee(self.token.as_ref(), registry, &cmd.caller, quote.fee).await?;

        record.complete_exit(settled_at, self.settings.settlement);
        if let Err(e) = self.repository.update(&record).await {
            refund_fee(self.token.as_ref(), registry, &cmd.caller, quote.fee).await;
            return Err(e.into());
        }

        info!(
            account = %cmd.caller,
            duration_secs = quote.duration_secs,
            intervals = quote.intervals,
            fee = %quote.fee,
            "Exit fee settled"
        );

        let event = ExitSettled {
            event_id: EventId::new(),
            account: cmd.caller.clone(),
            entered_at,
            duration_secs: quote.duration_secs,
            intervals: quote.intervals,
            fee_paid: quote.fee,
            settled_at,
        };
        publish_event(self.event_publisher.as_ref(), &event, &cmd.caller).await;

        Ok(SettleExitFeeResult {
            entered_at,
            settled_at,
            quote,
            record,
            event,
        })
    }
}
