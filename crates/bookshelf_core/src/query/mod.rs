//! Read-side query and sort entry points.
//!
//! # Responsibility
//! - Turn repository lookups into display-ordered book lists.
//! - Keep ordering policy inside core so every caller sorts the same way.

pub mod view;
