//! Registration status state machine.
//!
//! Registration is one-way: once an account is registered it never returns
//! to the unregistered state.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Registration status of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// No membership fee paid; no parking number on file.
    Unregistered,

    /// Membership fee paid; parking number on file.
    Registered,
}

impl RegistrationStatus {
    /// Returns true if this status carries membership.
    pub fn is_registered(&self) -> bool {
        matches!(self, RegistrationStatus::Registered)
    }
}

impl StateMachine for RegistrationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RegistrationStatus::*;
        matches!((self, target), (Unregistered, Registered))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RegistrationStatus::*;
        match self {
            Unregistered => vec![Registered],
            Registered => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_can_register() {
        assert!(RegistrationStatus::Unregistered
            .can_transition_to(&RegistrationStatus::Registered));
    }

    #[test]
    fn registered_cannot_revert() {
        assert!(!RegistrationStatus::Registered
            .can_transition_to(&RegistrationStatus::Unregistered));
        assert!(RegistrationStatus::Registered
            .transition_to(RegistrationStatus::Unregistered)
            .is_err());
    }

    #[test]
    fn registered_cannot_register_twice() {
        assert!(RegistrationStatus::Registered
            .transition_to(RegistrationStatus::Registered)
            .is_err());
    }

    #[test]
    fn registered_is_terminal() {
        assert!(RegistrationStatus::Registered.is_terminal());
        assert!(!RegistrationStatus::Unregistered.is_terminal());
    }

    #[test]
    fn valid_transitions_are_consistent_with_can_transition_to() {
        for from in [RegistrationStatus::Unregistered, RegistrationStatus::Registered] {
            for to in from.valid_transitions() {
                assert!(from.can_transition_to(&to));
            }
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&RegistrationStatus::Registered).unwrap();
        assert_eq!(json, "\"registered\"");
    }
}
