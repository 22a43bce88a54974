//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `clock` - System and manual clocks
//! - `events` - In-memory event bus
//! - `http` - Axum REST API
//! - `memory` - In-memory member repository
//! - `token` - In-memory fee token ledger

pub mod clock;
pub mod events;
pub mod http;
pub mod memory;
pub mod token;

pub use clock::{ManualClock, SystemClock};
pub use events::InMemoryEventBus;
pub use memory::InMemoryMemberRepository;
pub use token::InMemoryFeeToken;
