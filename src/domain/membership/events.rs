//! Membership domain events.
//!
//! Published after each successful mutation of a member record:
//! - `MemberRegistered` - membership fee collected, parking number on file
//! - `EntryRecorded` - a stay started
//! - `ExitSettled` - exit fee collected for a stay

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, AccountId, EventId, ParkingNumber, Timestamp, TokenAmount,
};

/// Published when an account pays the membership fee.
///
/// Also published for a paid re-registration, with `replaced` holding the
/// previous parking number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRegistered {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// Registered account.
    pub account: AccountId,

    /// Parking number on file.
    pub parking_number: ParkingNumber,

    /// Parking number this registration replaced.
    pub replaced: Option<ParkingNumber>,

    /// Membership fee collected.
    pub fee_paid: TokenAmount,

    /// When registration completed.
    pub registered_at: Timestamp,
}

domain_event!(
    MemberRegistered,
    event_type = "membership.registered.v1",
    aggregate_id = account,
    aggregate_type = "Member",
    occurred_at = registered_at,
    event_id = event_id
);

/// Published when a member's entry time is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecorded {
    pub event_id: EventId,
    pub account: AccountId,

    /// Entry this one replaced, if a stay was already open.
    pub previous_entry: Option<Timestamp>,

    pub entered_at: Timestamp,
}

domain_event!(
    EntryRecorded,
    event_type = "parking.entry_recorded.v1",
    aggregate_id = account,
    aggregate_type = "Member",
    occurred_at = entered_at,
    event_id = event_id
);

/// Published when an exit fee is settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitSettled {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// Member who exited.
    pub account: AccountId,

    /// Start of the billed stay.
    pub entered_at: Timestamp,

    /// Seconds parked.
    pub duration_secs: u64,

    /// Completed intervals billed.
    pub intervals: u64,

    /// Fee collected. Zero within the grace period.
    pub fee_paid: TokenAmount,

    /// When settlement completed.
    pub settled_at: Timestamp,
}

domain_event!(
    ExitSettled,
    event_type = "parking.exit_settled.v1",
    aggregate_id = account,
    aggregate_type = "Member",
    occurred_at = settled_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, EventEnvelope};

    fn account() -> AccountId {
        AccountId::new("0xdriver").unwrap()
    }

    #[test]
    fn member_registered_implements_domain_event() {
        let event = MemberRegistered {
            event_id: EventId::new(),
            account: account(),
            parking_number: ParkingNumber::new(123).unwrap(),
            replaced: None,
            fee_paid: TokenAmount::from(10u64),
            registered_at: Timestamp::now(),
        };

        assert_eq!(event.event_type(), "membership.registered.v1");
        assert_eq!(event.aggregate_id(), "0xdriver");
        assert_eq!(event.aggregate_type(), "Member");
        assert_eq!(event.schema_version(), 1);
    }

    #[test]
    fn exit_settled_serializes_into_envelope() {
        let settled_at = Timestamp::from_unix_secs(1_700_014_400).unwrap();
        let event = ExitSettled {
            event_id: EventId::from_string("evt-exit"),
            account: account(),
            entered_at: Timestamp::from_unix_secs(1_700_000_000).unwrap(),
            duration_secs: 14_400,
            intervals: 6,
            fee_paid: TokenAmount::from(6000u64),
            settled_at,
        };

        let envelope = EventEnvelope::from_event(&event).unwrap();
        assert_eq!(envelope.event_type, "parking.exit_settled.v1");
        assert_eq!(envelope.aggregate_id, "0xdriver");
        assert_eq!(envelope.occurred_at, settled_at);
        assert_eq!(envelope.payload["fee_paid"], 6000);

        let decoded: ExitSettled = envelope.payload_as().unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn entry_recorded_uses_entry_time() {
        let entered_at = Timestamp::now();
        let event = EntryRecorded {
            event_id: EventId::new(),
            account: account(),
            previous_entry: None,
            entered_at,
        };
        assert_eq!(event.occurred_at(), entered_at);
        assert_eq!(event.event_type(), "parking.entry_recorded.v1");
    }
}
