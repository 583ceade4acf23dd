//! `SessionRepository` implementations.

pub mod inmemory;

pub use inmemory::InMemorySessionRepository;
