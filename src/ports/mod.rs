//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MemberRepository` - Member record persistence
//! - `PaymentToken` - Fee token ledger (pull, refund, balance, allowance)
//! - `Clock` - Current time
//! - `EventPublisher` - Domain event publishing

mod clock;
mod event_publisher;
mod member_repository;
mod payment_token;

pub use clock::Clock;
pub use event_publisher::EventPublisher;
pub use member_repository::MemberRepository;
pub use payment_token::{PaymentToken, TokenError};
