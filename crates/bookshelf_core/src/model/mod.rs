//! Inventory domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep raw presentation input out of repository signatures.
//!
//! # Invariants
//! - Every book is identified by a store-assigned `BookId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod book;
