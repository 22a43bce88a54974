//! Shared fixtures for the membership handler tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::adapters::clock::ManualClock;
use crate::adapters::events::InMemoryEventBus;
use crate::adapters::memory::InMemoryMemberRepository;
use crate::adapters::token::InMemoryFeeToken;
use crate::application::RegistrySettings;
use crate::domain::foundation::{
    AccountId, DomainError, ErrorCode, ParkingNumber, Timestamp, TokenAmount,
};
use crate::domain::membership::MemberRecord;
use crate::ports::{Clock, MemberRepository, PaymentToken};

pub const START: i64 = 1_700_000_000;
pub const HOUR: i64 = 60 * 60;

pub fn account(s: &str) -> AccountId {
    AccountId::new(s).unwrap()
}

pub fn units(n: u64) -> TokenAmount {
    TokenAmount::from(n)
}

/// Repository whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyRepository {
    inner: InMemoryMemberRepository,
    fail_writes: AtomicBool,
}

impl FlakyRepository {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated write failure",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl MemberRepository for FlakyRepository {
    async fn save(&self, record: &MemberRecord) -> Result<(), DomainError> {
        self.check()?;
        self.inner.save(record).await
    }

    async fn update(&self, record: &MemberRecord) -> Result<(), DomainError> {
        self.check()?;
        self.inner.update(record).await
    }

    async fn find_by_account(
        &self,
        account: &AccountId,
    ) -> Result<Option<MemberRecord>, DomainError> {
        self.inner.find_by_account(account).await
    }

    async fn count_registered(&self) -> Result<u64, DomainError> {
        self.inner.count_registered().await
    }
}

/// In-memory adapters wired the way the registry uses them.
pub struct Fixture {
    pub repository: Arc<FlakyRepository>,
    pub token: Arc<InMemoryFeeToken>,
    pub clock: Arc<ManualClock>,
    pub bus: Arc<InMemoryEventBus>,
    pub settings: RegistrySettings,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            repository: Arc::new(FlakyRepository::default()),
            token: Arc::new(InMemoryFeeToken::new(account("minter"), "PARK", 18)),
            clock: Arc::new(ManualClock::new(Timestamp::from_unix_secs(START).unwrap())),
            bus: Arc::new(InMemoryEventBus::new()),
            settings: RegistrySettings::new(account("registry")),
        }
    }

    pub fn registry(&self) -> AccountId {
        self.settings.registry_account.clone()
    }

    /// Mints `balance` to `who` and approves the registry for `allowance`.
    pub async fn fund(&self, who: &str, balance: u64, allowance: u64) {
        self.token
            .mint(&account("minter"), &account(who), units(balance))
            .await
            .unwrap();
        self.token
            .approve(&account(who), &self.registry(), units(allowance))
            .await;
    }

    pub async fn balance(&self, who: &AccountId) -> TokenAmount {
        self.token.balance_of(who).await.unwrap()
    }

    /// Stores a registered record directly, bypassing fee collection.
    pub async fn seed_member(&self, who: &str, number: u64) -> MemberRecord {
        let record = MemberRecord::register(
            account(who),
            ParkingNumber::new(number).unwrap(),
            Timestamp::from_unix_secs(START).unwrap(),
        )
        .unwrap();
        self.repository.save(&record).await.unwrap();
        record
    }

    /// Stores a member with an entry recorded `hours_ago` before the clock.
    pub async fn seed_parked(&self, who: &str, hours_ago: i64) -> MemberRecord {
        let mut record = self.seed_member(who, 1).await;
        let entered = self.clock.now().plus_secs(-hours_ago * HOUR);
        record.record_entry(entered).unwrap();
        self.repository.update(&record).await.unwrap();
        record
    }
}
