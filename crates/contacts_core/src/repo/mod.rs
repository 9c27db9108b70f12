//! Repository layer for contact persistence.
//!
//! # Responsibility
//! - Define the contact data access contract.
//! - Keep SQL details behind the repository boundary.
//!
//! # Invariants
//! - Each operation issues exactly one parameterized statement.
//! - `NotFound` is reported separately from statement failures.

pub mod contact_repo;
