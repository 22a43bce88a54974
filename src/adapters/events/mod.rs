//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus that records and logs every event

mod in_memory;

pub use in_memory::InMemoryEventBus;
