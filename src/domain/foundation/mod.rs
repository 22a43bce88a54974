//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and event plumbing
//! that form the vocabulary of the parking membership domain.

mod amount;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use amount::TokenAmount;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{AccountId, ParkingNumber};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
