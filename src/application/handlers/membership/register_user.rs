//! RegisterUserHandler - Command handler for paid registration.

use std::sync::Arc;
use tracing::info;

use crate::application::RegistrySettings;
use crate::domain::foundation::{AccountId, EventId, ParkingNumber, TokenAmount};
use crate::domain::membership::{
    MemberRecord, MemberRegistered, MembershipError, ReRegistrationPolicy,
};
use crate::ports::{Clock, EventPublisher, MemberRepository, PaymentToken};

use super::payments::{collect_fee, publish_event, refund_fee};

/// Command to register the caller under a parking number.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub caller: AccountId,
    pub parking_number: u64,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterUserResult {
    pub record: MemberRecord,
    pub fee_paid: TokenAmount,
    pub event: MemberRegistered,
}

/// Handler for paid registration.
///
/// The membership fee is pulled before the record is written. If the write
/// fails the fee is sent back.
pub struct RegisterUserHandler {
    repository: Arc<dyn MemberRepository>,
    token: Arc<dyn PaymentToken>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
    settings: RegistrySettings,
}

impl RegisterUserHandler {
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
        cmd: RegisterUserCommand,
    ) -> Result<RegisterUserResult, MembershipError> {
        let parking_number = ParkingNumber::new(cmd.parking_number)?;
        let existing = self.repository.find_by_account(&cmd.caller).await?;

        if existing.is_some() && self.settings.re_registration == ReRegistrationPolicy::Reject {
            return Err(MembershipError::already_registered(cmd.caller));
        }

        let fee = self.settings.fee_schedule.membership_fee();
        let registry = &self.settings.registry_account;
        collect_fee(self.token.as_ref(), registry, &cmd.caller, fee).await?;

        let now = self.clock.now();
        let (record, replaced, write) = match existing {
            Some(mut record) => {
                let replaced = record.parking_number;
                record.reassign(parking_number, now);
                let write = self.repository.update(&record).await;
                (record, Some(replaced), write)
            }
            None => {
                let record = match MemberRecord::register(cmd.caller.clone(), parking_number, now) {
                    Ok(record) => record,
                    Err(e) => {
                        refund_fee(self.token.as_ref(), registry, &cmd.caller, fee).await;
                        return Err(e);
                    }
                };
                let write = self.repository.save(&record).await;
                (record, None, write)
            }
        };

        if let Err(e) = write {
            refund_fee(self.token.as_ref(), registry, &cmd.caller, fee).await;
            return Err(e.into());
        }

        info!(
            account = %record.account,
            parking_number = %record.parking_number,
            fee = %fee,
            reregistered = replaced.is_some(),
            "Member registered"
        );

        let event = MemberRegistered {
            event_id: EventId::new(),
            account: record.account.clone(),
            parking_number: record.parking_number,
            replaced,
            fee_paid: fee,
            registered_at: now,
        };
        publish_event(self.event_publisher.as_ref(), &event, &record.account).await;

        Ok(RegisterUserResult {
            record,
            fee_paid: fee,
            event,
        })
    }
}
