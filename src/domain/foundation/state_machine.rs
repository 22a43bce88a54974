//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions on lifecycle statuses.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for RegistrationStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Unregistered, Registered))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Unregistered => vec![Registered],
///             Registered => vec![],
///         }
///     }
/// }
///
/// let status = RegistrationStatus::Unregistered.transition_to(RegistrationStatus::Registered)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Gate {
        Closed,
        Open,
        Locked,
    }

    impl StateMachine for Gate {
        fn can_transition_to(&self, target: &Self) -> bool {
            matches!(
                (self, target),
                (Gate::Closed, Gate::Open) | (Gate::Open, Gate::Closed) | (Gate::Closed, Gate::Locked)
            )
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Gate::Closed => vec![Gate::Open, Gate::Locked],
                Gate::Open => vec![Gate::Closed],
                Gate::Locked => vec![],
            }
        }
    }

    #[test]
    fn valid_transition_returns_target() {
        assert_eq!(Gate::Closed.transition_to(Gate::Open), Ok(Gate::Open));
    }

    #[test]
    fn invalid_transition_returns_error() {
        let err = Gate::Open.transition_to(Gate::Locked).unwrap_err();
        assert!(err.to_string().contains("Cannot transition from Open to Locked"));
    }

    #[test]
    fn terminal_state_has_no_transitions() {
        assert!(Gate::Locked.is_terminal());
        assert!(!Gate::Closed.is_terminal());
    }
}
