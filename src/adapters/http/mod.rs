//! HTTP adapters - REST API implementations.

pub mod membership;

pub use membership::{api_router, RegistryAppState};
