//! Operator policies for the two behaviors the registry leaves open:
//! what a second registration does, and whether settlement consumes the
//! recorded entry.

use serde::{Deserialize, Serialize};

/// What happens when an already-registered account registers again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReRegistrationPolicy {
    /// Fail with `AlreadyRegistered`; the parking number stays immutable.
    #[default]
    Reject,

    /// Charge the membership fee again and replace the parking number.
    Overwrite,
}

/// What settlement does with the entry timestamp it billed against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementPolicy {
    /// Clear the entry after a successful settlement. A second settlement
    /// without a new entry fails with `NoActiveEntry`.
    #[default]
    ConsumeEntry,

    /// Keep the entry. Repeated settlements bill again from the same start.
    RetainEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_safe_choices() {
        assert_eq!(ReRegistrationPolicy::default(), ReRegistrationPolicy::Reject);
        assert_eq!(SettlementPolicy::default(), SettlementPolicy::ConsumeEntry);
    }

    #[test]
    fn policies_deserialize_from_snake_case() {
        let policy: SettlementPolicy = serde_json::from_str("\"retain_entry\"").unwrap();
        assert_eq!(policy, SettlementPolicy::RetainEntry);

        let policy: ReRegistrationPolicy = serde_json::from_str("\"overwrite\"").unwrap();
        assert_eq!(policy, ReRegistrationPolicy::Overwrite);
    }
}
