//! Domain model for contact records.
//!
//! # Invariants
//! - The store is the sole owner of persisted state; values here are
//!   transient copies produced per call.

pub mod contact;
