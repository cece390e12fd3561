//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, selector, transfer and sync into UI-free command
//!   handlers.
//! - Keep embedding layers (CLI, future UI shells) decoupled from storage
//!   and merge details.

pub mod quote_service;
