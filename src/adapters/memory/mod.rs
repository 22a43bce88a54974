//! In-memory persistence adapters.

mod member_repository;

pub use member_repository::InMemoryMemberRepository;
