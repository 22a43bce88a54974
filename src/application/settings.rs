//! Registry settings shared by every handler.

use crate::domain::foundation::AccountId;
use crate::domain::membership::{FeeSchedule, ReRegistrationPolicy, SettlementPolicy};

/// Operator-chosen parameters of a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySettings {
    /// Account that receives fees and spends allowances.
    pub registry_account: AccountId,

    pub fee_schedule: FeeSchedule,

    pub re_registration: ReRegistrationPolicy,

    pub settlement: SettlementPolicy,
}

impl RegistrySettings {
    /// Settings with the default fee schedule and policies.
    pub fn new(registry_account: AccountId) -> Self {
        Self {
            registry_account,
            fee_schedule: FeeSchedule::default(),
            re_registration: ReRegistrationPolicy::default(),
            settlement: SettlementPolicy::default(),
        }
    }

    pub fn with_fee_schedule(mut self, fee_schedule: FeeSchedule) -> Self {
        self.fee_schedule = fee_schedule;
        self
    }

    pub fn with_re_registration(mut self, policy: ReRegistrationPolicy) -> Self {
        self.re_registration = policy;
        self
    }

    pub fn with_settlement(mut self, policy: SettlementPolicy) -> Self {
        self.settlement = policy;
        self
    }
}
