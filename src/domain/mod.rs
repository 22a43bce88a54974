//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `membership` - Registration, entry recording and exit fees

pub mod foundation;
pub mod membership;
