//! Domain model for the dashboard board.
//!
//! # Responsibility
//! - Define the app and group records every other layer operates on.
//! - Keep one storage shape shared by the canonical store, projections and
//!   the config wire format.
//!
//! # Invariants
//! - Names are the sole identity keys; there are no surrogate ids.
//! - `order` fields are container-local ranks, stamped by store and sync
//!   code, never by the model itself.

pub mod app;
pub mod group;
pub mod icon;
