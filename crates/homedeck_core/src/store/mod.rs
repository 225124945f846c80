//! Canonical storage for the dashboard board.
//!
//! # Responsibility
//! - Own the authoritative flat app list and ordered group list.
//! - Enforce identity and container invariants on every mutation.
//!
//! # Invariants
//! - There is no global store; each editing session owns a [`board::Board`]
//!   value and drops it when the session closes.

pub mod board;
