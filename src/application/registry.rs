//! MembershipRegistry - the single entry point for registry operations.
//!
//! Wires the membership handlers to one set of ports and serializes every
//! mutating call behind one async guard, so registrations, entries and
//! settlements observe a total order. Queries never wait on the guard.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{AccountId, Timestamp};
use crate::domain::membership::{FeeSchedule, MembershipError};
use crate::ports::{Clock, EventPublisher, MemberRepository, PaymentToken};

use super::handlers::membership::{
    AuthenticateUserHandler, AuthenticateUserQuery, CheckUserHandler, CheckUserQuery,
    CheckUserResult, GetEntryHandler, GetEntryQuery, QuoteExitFeeHandler, QuoteExitFeeQuery,
    QuoteExitFeeResult, RecordEntryCommand, RecordEntryHandler, RecordEntryResult,
    RegisterUserCommand, RegisterUserHandler, RegisterUserResult, SettleExitFeeCommand,
    SettleExitFeeHandler, SettleExitFeeResult,
};
use super::RegistrySettings;

/// Ports the registry runs against.
#[derive(Clone)]
pub struct RegistryPorts {
    pub repository: Arc<dyn MemberRepository>,
    pub token: Arc<dyn PaymentToken>,
    pub clock: Arc<dyn Clock>,
    pub event_publisher: Arc<dyn EventPublisher>,
}

/// Parking membership registry.
pub struct MembershipRegistry {
    settings: RegistrySettings,
    repository: Arc<dyn MemberRepository>,
    write_guard: Mutex<()>,
    register_user: RegisterUserHandler,
    check_user: CheckUserHandler,
    authenticate_user: AuthenticateUserHandler,
    record_entry: RecordEntryHandler,
    get_entry: GetEntryHandler,
    quote_exit_fee: QuoteExitFeeHandler,
    settle_exit_fee: SettleExitFeeHandler,
}

impl MembershipRegistry {
    pub fn new(ports: RegistryPorts, settings: RegistrySettings) -> Self {
        let RegistryPorts {
            repository,
            token,
            clock,
            event_publisher,
        } = ports;

        Self {
            register_user: RegisterUserHandler::new(
                repository.clone(),
                token.clone(),
                clock.clone(),
                event_publisher.clone(),
                settings.clone(),
            ),
            check_user: CheckUserHandler::new(repository.clone()),
            authenticate_user: AuthenticateUserHandler::new(repository.clone()),
            record_entry: RecordEntryHandler::new(
                repository.clone(),
                clock.clone(),
                event_publisher.clone(),
            ),
            get_entry: GetEntryHandler::new(repository.clone()),
            quote_exit_fee: QuoteExitFeeHandler::new(
                repository.clone(),
                clock.clone(),
                settings.fee_schedule,
            ),
            settle_exit_fee: SettleExitFeeHandler::new(
                repository.clone(),
                token,
                clock,
                event_publisher,
                settings.clone(),
            ),
            repository,
            write_guard: Mutex::new(()),
            settings,
        }
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    pub fn registry_account(&self) -> &AccountId {
        &self.settings.registry_account
    }

    pub fn fee_schedule(&self) -> &FeeSchedule {
        &self.settings.fee_schedule
    }

    // === Commands ===

    /// Registers `caller` under `parking_number`, collecting the membership fee.
    pub async fn register_user(
        &self,
        caller: AccountId,
        parking_number: u64,
    ) -> Result<RegisterUserResult, MembershipError> {
        let _guard = self.write_guard.lock().await;
        self.register_user
            .handle(RegisterUserCommand {
                caller,
                parking_number,
            })
            .await
    }

    /// Sets `caller`'s entry time to now.
    pub async fn record_entry(
        &self,
        caller: AccountId,
    ) -> Result<RecordEntryResult, MembershipError> {
        let _guard = self.write_guard.lock().await;
        self.record_entry.handle(RecordEntryCommand { caller }).await
    }

    /// Collects the exit fee for `caller`'s open stay.
    pub async fn settle_exit_fee(
        &self,
        caller: AccountId,
    ) -> Result<SettleExitFeeResult, MembershipError> {
        let _guard = self.write_guard.lock().await;
        self.settle_exit_fee
            .handle(SettleExitFeeCommand { caller })
            .await
    }

    // === Queries ===

    pub async fn check_user(&self, caller: AccountId) -> Result<bool, MembershipError> {
        Ok(self.member(caller).await?.is_registered)
    }

    /// Status plus the stored record, if any.
    pub async fn member(&self, caller: AccountId) -> Result<CheckUserResult, MembershipError> {
        self.check_user.handle(CheckUserQuery { caller }).await
    }

    pub async fn authenticate_user(
        &self,
        caller: AccountId,
        parking_number: u64,
    ) -> Result<bool, MembershipError> {
        let result = self
            .authenticate_user
            .handle(AuthenticateUserQuery {
                caller,
                parking_number,
            })
            .await?;
        Ok(result.authenticated)
    }

    pub async fn get_entry(&self, caller: AccountId) -> Result<Option<Timestamp>, MembershipError> {
        let result = self.get_entry.handle(GetEntryQuery { caller }).await?;
        Ok(result.entered_at)
    }

    pub async fn quote_exit_fee(
        &self,
        caller: AccountId,
    ) -> Result<QuoteExitFeeResult, MembershipError> {
        self.quote_exit_fee
            .handle(QuoteExitFeeQuery { caller })
            .await
    }

    pub async fn member_count(&self) -> Result<u64, MembershipError> {
        Ok(self.repository.count_registered().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::{account, units, Fixture, HOUR};

    fn registry(fx: &Fixture) -> Arc<MembershipRegistry> {
        Arc::new(MembershipRegistry::new(
            RegistryPorts {
                repository: fx.repository.clone(),
                token: fx.token.clone(),
                clock: fx.clock.clone(),
                event_publisher: fx.bus.clone(),
            },
            fx.settings.clone(),
        ))
    }

    #[tokio::test]
    async fn full_lifecycle() {
        let fx = Fixture::new();
        fx.fund("alice", 100_000, 100_000).await;
        let registry = registry(&fx);

        assert!(!registry.check_user(account("alice")).await.unwrap());

        registry.register_user(account("alice"), 123).await.unwrap();
        assert!(registry.check_user(account("alice")).await.unwrap());
        assert!(registry.authenticate_user(account("alice"), 123).await.unwrap());

        let entry = registry.record_entry(account("alice")).await.unwrap();
        assert_eq!(
            registry.get_entry(account("alice")).await.unwrap(),
            Some(entry.entered_at)
        );

        fx.clock.advance(4 * HOUR);
        let quote = registry.quote_exit_fee(account("alice")).await.unwrap();
        let settled = registry.settle_exit_fee(account("alice")).await.unwrap();

        assert_eq!(quote.quote, settled.quote);
        assert_eq!(fx.balance(&fx.registry()).await, units(10 + 6_000));
        assert_eq!(registry.get_entry(account("alice")).await.unwrap(), None);
        assert_eq!(registry.member_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_registrations_of_one_account_charge_once() {
        let fx = Fixture::new();
        fx.fund("alice", 1_000, 1_000).await;
        let registry = registry(&fx);

        let mut tasks = Vec::new();
        for n in 1..=8u64 {
            let registry = registry.clone();
            tasks.push(tokio::spawn(async move {
                registry.register_user(account("alice"), n).await
            }));
        }

        let mut successes = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(fx.balance(&fx.registry()).await, units(10));
    }

    #[tokio::test]
    async fn concurrent_settlements_bill_once() {
        let fx = Fixture::new();
        fx.fund("alice", 100_000, 100_000).await;
        fx.seed_parked("alice", 4).await;
        let registry = registry(&fx);

        let a = tokio::spawn({
            let registry = registry.clone();
            async move { registry.settle_exit_fee(account("alice")).await }
        });
        let b = tokio::spawn({
            let registry = registry.clone();
            async move { registry.settle_exit_fee(account("alice")).await }
        });

        let results = [a.await.unwrap(), b.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(fx.balance(&fx.registry()).await, units(6_000));
    }
}
