//! Member record aggregate.
//!
//! One record per registered account. A record only exists after the
//! membership fee has been collected, so a missing record and an
//! unregistered account mean the same thing.
//!
//! # Design Decisions
//!
//! - **Absence is `None`**: no entry is `None`, never a zero timestamp
//! - **Parking number is fixed**: only an explicit re-registration replaces it
//! - **Clock is injected**: every mutation takes `now` from the caller

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, ParkingNumber, StateMachine, Timestamp};

use super::{MembershipError, RegistrationStatus, SettlementPolicy};

/// Member record aggregate.
///
/// # Invariants
///
/// - `status` is `Registered` for every persisted record
/// - `entry_timestamp` is the time of the most recent entry recording
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Caller identity that owns this membership.
    pub account: AccountId,

    /// Parking space chosen at registration.
    pub parking_number: ParkingNumber,

    /// Registration status.
    pub status: RegistrationStatus,

    /// Start of the current stay, if any.
    pub entry_timestamp: Option<Timestamp>,

    /// When the membership fee was collected.
    pub registered_at: Timestamp,

    /// When the parking number was last replaced.
    pub updated_at: Timestamp,

    /// When an exit fee was last settled.
    pub last_settled_at: Option<Timestamp>,
}

impl MemberRecord {
    /// Creates a registered member.
    pub fn register(
        account: AccountId,
        parking_number: ParkingNumber,
        now: Timestamp,
    ) -> Result<Self, MembershipError> {
        let status = RegistrationStatus::Unregistered.transition_to(RegistrationStatus::Registered)?;

        Ok(Self {
            account,
            parking_number,
            status,
            entry_timestamp: None,
            registered_at: now,
            updated_at: now,
            last_settled_at: None,
        })
    }

    pub fn is_registered(&self) -> bool {
        self.status.is_registered()
    }

    /// Exact match of the stored parking number.
    pub fn authenticates(&self, parking_number: u64) -> bool {
        self.is_registered() && self.parking_number.value() == parking_number
    }

    /// Replaces the parking number after a paid re-registration.
    pub fn reassign(&mut self, parking_number: ParkingNumber, now: Timestamp) {
        self.parking_number = parking_number;
        self.updated_at = now;
    }

    /// Starts a stay at `now`, replacing any earlier entry.
    pub fn record_entry(&mut self, now: Timestamp) -> Result<Timestamp, MembershipError> {
        if !self.is_registered() {
            return Err(MembershipError::not_registered(self.account.clone()));
        }
        self.entry_timestamp = Some(now);
        Ok(now)
    }

    pub fn entry(&self) -> Option<Timestamp> {
        self.entry_timestamp
    }

    /// Whole unix seconds parked as of `now`.
    ///
    /// A clock that reads earlier than the entry yields zero.
    pub fn parked_seconds(&self, now: Timestamp) -> Result<u64, MembershipError> {
        let entry = self
            .entry_timestamp
            .ok_or_else(|| MembershipError::no_active_entry(self.account.clone()))?;
        Ok(u64::try_from(now.seconds_since(&entry)).unwrap_or(0))
    }

    /// Closes the stay after the exit fee was collected.
    pub fn complete_exit(&mut self, now: Timestamp, policy: SettlementPolicy) {
        if policy == SettlementPolicy::ConsumeEntry {
            self.entry_timestamp = None;
        }
        self.last_settled_at = Some(now);
    }
}
