//! Profile wizard core.
//!
//! A three-step guided flow for creating and editing profiles, backed by a
//! durable list persisted as one JSON document in a key-value storage slot.

pub mod config;
pub mod error;
pub mod profile;
pub mod store;
pub mod wizard;
