//! Storage layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value contract backing quote persistence.
//! - Keep SQLite details isolated from store/business orchestration.
//!
//! # Invariants
//! - Store writes must enforce `Quote::validate()` before persistence.
//! - The store is the single owner of the in-memory quote list; every other
//!   component reads through it or submits whole-record writes.

pub mod kv_repo;
pub mod quote_store;
