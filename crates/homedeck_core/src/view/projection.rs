//! Drag-surface projection: per-group buckets plus the group lane.
//!
//! # Responsibility
//! - Present the board as the ordered buckets a drag-and-drop surface owns.
//! - Absorb mid-gesture consider events without touching the board.
//! - Track whether unflushed consider-state exists (the scratch flag).
//!
//! # Invariants
//! - `rebuild` output is a pure function of the board.
//! - The ungrouped bucket (key `""`) always exists, even when empty.
//! - Consider events only ever replace projection contents; fold-back into
//!   the board is the sync module's job.

use crate::model::app::App;
use crate::model::group::Group;
use crate::store::board::Board;
use std::collections::BTreeMap;

/// Bucket key for apps that belong to no group.
pub const UNGROUPED: &str = "";

/// Mutable projection owned by the drag surface between rebuilds.
///
/// The surface hands whole replacement lists to [`BoardView::consider_bucket`]
/// while a drag is in flight, and the owning session folds the final state
/// back on drop. Between those two points the projection is scratch data and
/// canonical mutations must wait.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardView {
    groups: Vec<Group>,
    buckets: BTreeMap<String, Vec<App>>,
    scratch: bool,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the projection from the board, discarding any scratch state.
    ///
    /// Groups come out in lane-rank order and every bucket in member-rank
    /// order. Apps pointing at a group the board does not know land in the
    /// ungrouped bucket, mirroring how the store normalizes imports.
    pub fn rebuild(&mut self, board: &Board) {
        let mut groups = board.groups().to_vec();
        groups.sort_by_key(|g| g.order);

        let mut buckets: BTreeMap<String, Vec<App>> = BTreeMap::new();
        buckets.insert(UNGROUPED.to_string(), Vec::new());
        for group in &groups {
            buckets.entry(group.name.clone()).or_default();
        }
        for app in board.apps() {
            let key = if buckets.contains_key(app.group.as_str()) {
                app.group.clone()
            } else {
                UNGROUPED.to_string()
            };
            buckets.entry(key).or_default().push(app.clone());
        }
        for bucket in buckets.values_mut() {
            bucket.sort_by_key(|a| a.order);
        }

        self.groups = groups;
        self.buckets = buckets;
        self.scratch = false;
    }

    /// Groups in lane order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// One bucket's apps in order; empty for unknown keys.
    pub fn bucket(&self, group_name: &str) -> &[App] {
        self.buckets
            .get(group_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All bucket keys. The ungrouped key `""` sorts first.
    pub fn bucket_names(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Total apps across all buckets.
    pub fn app_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Replaces one bucket's contents mid-gesture and raises the scratch
    /// flag. Nothing canonical happens here.
    pub fn consider_bucket(&mut self, group_name: &str, items: Vec<App>) {
        self.buckets.insert(group_name.to_string(), items);
        self.scratch = true;
    }

    /// Replaces the group lane mid-gesture and raises the scratch flag.
    pub fn consider_group_order(&mut self, groups: Vec<Group>) {
        self.groups = groups;
        self.scratch = true;
    }

    /// Moves a bucket under a new key after a group rename.
    ///
    /// Lane entries and the moved apps' `group` fields follow the new key.
    /// When the new key already holds a bucket the moved apps append after
    /// its existing members. Returns `false` when `old_name` had no bucket.
    pub fn rekey_bucket(&mut self, old_name: &str, new_name: &str) -> bool {
        let mut moved = match self.buckets.remove(old_name) {
            Some(items) => items,
            None => return false,
        };
        for app in &mut moved {
            app.group = new_name.to_string();
        }
        self.buckets
            .entry(new_name.to_string())
            .or_default()
            .extend(moved);
        for group in &mut self.groups {
            if group.name == old_name {
                group.name = new_name.to_string();
            }
        }
        true
    }

    /// Whether consider-state exists that has not been folded back or
    /// discarded by a rebuild.
    pub fn has_scratch(&self) -> bool {
        self.scratch
    }
}
