//! Fold-back from the projection into the canonical board.
//!
//! # Responsibility
//! - Apply a finalized drag result, bucket-scoped or lane-scoped, to the
//!   board.
//! - Rebuild the whole flat list from a projection after bulk edits.
//!
//! # Invariants
//! - `flush_bucket` is authoritative for its target bucket only; apps homed
//!   in other buckets keep their fields and relative positions.
//! - `flush_view` leaves every container densely ranked `0..len`.
//! - Flushes never consult the scratch flag; the owning session decides
//!   when a flush is due.

use crate::model::app::App;
use crate::model::group::Group;
use crate::store::board::Board;
use crate::view::projection::{BoardView, UNGROUPED};
use log::debug;
use std::collections::BTreeSet;

/// Applies one finalized bucket to the board.
///
/// Every entry of `items` is claimed for `group_name` and ranked by its
/// position, wherever it was homed before. Apps absent from `items` that
/// belong to other buckets are kept unchanged ahead of the finalized bucket.
/// Apps that belonged to `group_name` but are absent from `items` are
/// dropped, because the drop payload is the complete bucket.
pub fn flush_bucket(board: &mut Board, group_name: &str, items: &[App]) {
    let claimed: BTreeSet<&str> = items.iter().map(|a| a.name.as_str()).collect();
    let mut next: Vec<App> = board
        .apps()
        .iter()
        .filter(|app| app.group != group_name && !claimed.contains(app.name.as_str()))
        .cloned()
        .collect();
    for (rank, item) in items.iter().enumerate() {
        let mut app = item.clone();
        app.group = group_name.to_string();
        app.order = rank;
        next.push(app);
    }
    debug!(
        "event=bucket_flush module=sync status=ok group={:?} items={}",
        group_name,
        items.len()
    );
    board.set_apps(next);
}

/// Applies a finalized group lane to the board.
///
/// The stored group list is replaced by `groups` with `order` re-stamped to
/// lane position. Bucket membership is untouched.
pub fn flush_group_order(board: &mut Board, groups: &[Group]) {
    let mut next = groups.to_vec();
    for (rank, group) in next.iter_mut().enumerate() {
        group.order = rank;
    }
    debug!(
        "event=lane_flush module=sync status=ok groups={}",
        next.len()
    );
    board.set_groups(next);
}

/// Rebuilds the whole board from the projection.
///
/// The lane is flushed first, then buckets are flattened ungrouped-first and
/// then in lane order, each container re-stamped dense. A bucket keyed by a
/// name that is neither `""` nor a projected group is dropped here; that is
/// where an unpaired rename loses its orphaned bucket.
pub fn flush_view(board: &mut Board, view: &BoardView) {
    flush_group_order(board, view.groups());

    let mut apps = Vec::with_capacity(view.app_count());
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    seen.insert(UNGROUPED);
    collect_bucket(&mut apps, UNGROUPED, view.bucket(UNGROUPED));
    for group in view.groups() {
        if seen.insert(group.name.as_str()) {
            collect_bucket(&mut apps, &group.name, view.bucket(&group.name));
        }
    }
    debug!(
        "event=view_flush module=sync status=ok apps={} groups={}",
        apps.len(),
        view.groups().len()
    );
    board.set_apps(apps);
}

fn collect_bucket(into: &mut Vec<App>, key: &str, items: &[App]) {
    for (rank, item) in items.iter().enumerate() {
        let mut app = item.clone();
        app.group = key.to_string();
        app.order = rank;
        into.push(app);
    }
}
