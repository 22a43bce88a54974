//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).
//! `MembershipRegistry` fronts all of them for the HTTP adapter and the binary.

pub mod handlers;
mod registry;
mod settings;

pub use registry::{MembershipRegistry, RegistryPorts};
pub use settings::RegistrySettings;
