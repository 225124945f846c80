//! Derived views over the canonical board.
//!
//! # Responsibility
//! - Shape board data the way interactive surfaces consume it.
//!
//! # Invariants
//! - Views hold copies, never references into the board; a view mutated by
//!   a drag gesture leaves the board untouched until a sync flush runs.

pub mod projection;
