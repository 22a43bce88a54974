//! RecordEntryHandler - Command handler for starting a stay.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{AccountId, EventId, Timestamp};
use crate::domain::membership::{EntryRecorded, MembershipError};
use crate::ports::{Clock, EventPublisher, MemberRepository};

use super::payments::publish_event;

/// Command to record the caller's entry at the current time.
#[derive(Debug, Clone)]
pub struct RecordEntryCommand {
    pub caller: AccountId,
}

#[derive(Debug, Clone)]
pub struct RecordEntryResult {
    pub entered_at: Timestamp,
    /// Entry that was still open and got replaced.
    pub previous_entry: Option<Timestamp>,
    pub event: EntryRecorded,
}

/// Handler for entry recording. Only members may record an entry.
pub struct RecordEntryHandler {
    repository: Arc<dyn MemberRepository>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RecordEntryHandler {
    pub fn new(
        repository: Arc<dyn MemberRepository>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            clock,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordEntryCommand,
    ) -> Result<RecordEntryResult, MembershipError> {
        let mut record = self
            .repository
            .find_by_account(&cmd.caller)
            .await?
            .ok_or_else(|| MembershipError::not_registered(cmd.caller.clone()))?;

        let previous_entry = record.entry();
        let entered_at = record.record_entry(self.clock.now())?;
        self.repository.update(&record).await?;

        info!(account = %cmd.caller, entered_at = %entered_at, "Entry recorded");

        let event = EntryRecorded {
            event_id: EventId::new(),
            account: cmd.caller.clone(),
            previous_entry,
            entered_at,
        };
        publish_event(self.event_publisher.as_ref(), &event, &cmd.caller).await;

        Ok(RecordEntryResult {
            entered_at,
            previous_entry,
            event,
        })
    }
}
