//! Canonical board: the flat app list plus the ordered group list.
//!
//! # Responsibility
//! - Validate and apply add, update, delete and rename mutations.
//! - Stamp container ranks on insert and re-home members on group delete.
//!
//! # Invariants
//! - App and group names are unique identity keys.
//! - Every `App.group` is `""` or the name of a stored group.
//! - Adds append: the new entity's rank equals the container size before it.
//! - Deletes leave sibling ranks untouched; holes close on the next flush.

use crate::model::app::App;
use crate::model::group::Group;
use crate::validate::{validate_app, validate_group, FieldErrors};
use log::{debug, info};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result alias for board lookups and mutations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors from board mutations keyed on a missing entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// No app stored under the given name.
    AppNotFound(String),
    /// No group stored under the given name.
    GroupNotFound(String),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::AppNotFound(name) => write!(f, "app not found: {name}"),
            BoardError::GroupNotFound(name) => write!(f, "group not found: {name}"),
        }
    }
}

impl Error for BoardError {}

/// Canonical store for one dashboard configuration.
///
/// A plain owned value on purpose: sessions construct one from config,
/// mutate it through these methods or the sync paths, and serialize it back
/// out on save. Projections derive from it and never alias into it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    apps: Vec<App>,
    groups: Vec<Group>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from imported parts.
    ///
    /// Apps referencing a group name that is not present are re-homed to the
    /// ungrouped bucket, so the membership invariant holds even after a
    /// wholesale config replacement from an external file.
    pub fn from_parts(apps: Vec<App>, groups: Vec<Group>) -> Self {
        let mut apps = apps;
        {
            let known: BTreeSet<&str> = groups.iter().map(|g| g.name.as_str()).collect();
            for app in &mut apps {
                if !app.group.is_empty() && !known.contains(app.group.as_str()) {
                    debug!(
                        "event=app_rehome module=store status=ok app={:?} missing_group={:?}",
                        app.name, app.group
                    );
                    app.group.clear();
                }
            }
        }
        Self { apps, groups }
    }

    /// All apps in flat storage order.
    pub fn apps(&self) -> &[App] {
        &self.apps
    }

    /// All groups in storage order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn app(&self, name: &str) -> Option<&App> {
        self.apps.iter().find(|a| a.name == name)
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn has_app(&self, name: &str) -> bool {
        self.app(name).is_some()
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.group(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty() && self.groups.is_empty()
    }

    /// Number of apps currently homed in `group_name` (`""` for ungrouped).
    pub fn container_len(&self, group_name: &str) -> usize {
        self.apps.iter().filter(|a| a.group == group_name).count()
    }

    /// Runs the add-time checks for an app without mutating anything.
    ///
    /// Gate schema checks plus uniqueness and container membership. Add paths
    /// call this internally; the session calls it first to merge extra
    /// failures (like shortcut conflicts) into one map.
    pub fn check_new_app(&self, candidate: &App) -> FieldErrors {
        let mut errors = validate_app(candidate);
        let name = candidate.name.trim();
        if errors.get("name").is_none() && self.has_app(name) {
            errors.push("name", "an app with this name already exists");
        }
        if !candidate.group.is_empty() && !self.has_group(&candidate.group) {
            errors.push("group", "group does not exist");
        }
        errors
    }

    /// Runs the add-time checks for a group without mutating anything.
    pub fn check_new_group(&self, candidate: &Group) -> FieldErrors {
        let mut errors = validate_group(candidate);
        let name = candidate.name.trim();
        if errors.get("name").is_none() && self.has_group(name) {
            errors.push("name", "a group with this name already exists");
        }
        errors
    }

    /// Validates and appends one app to its container.
    ///
    /// On success the app lands at the end of the container it names, with
    /// `order` stamped to the container size before the insert. On failure
    /// nothing is stored and the field map comes back for the form.
    pub fn add_app(&mut self, mut candidate: App) -> Result<(), FieldErrors> {
        self.check_new_app(&candidate).into_result()?;
        candidate.name = candidate.name.trim().to_string();
        candidate.url = candidate.url.trim().to_string();
        candidate.order = self.container_len(&candidate.group);
        info!(
            "event=app_add module=store status=ok app={:?} group={:?} rank={}",
            candidate.name, candidate.group, candidate.order
        );
        self.apps.push(candidate);
        Ok(())
    }

    /// Validates and appends one group to the end of the lane.
    pub fn add_group(&mut self, mut candidate: Group) -> Result<(), FieldErrors> {
        self.check_new_group(&candidate).into_result()?;
        candidate.name = candidate.name.trim().to_string();
        candidate.order = self.groups.len();
        info!(
            "event=group_add module=store status=ok group={:?} rank={}",
            candidate.name, candidate.order
        );
        self.groups.push(candidate);
        Ok(())
    }

    /// Removes one app by name and returns it.
    ///
    /// Sibling ranks are left as-is; the next rebuild orders around the hole
    /// and the next flush closes it.
    pub fn delete_app(&mut self, name: &str) -> BoardResult<App> {
        let index = self
            .apps
            .iter()
            .position(|a| a.name == name)
            .ok_or_else(|| BoardError::AppNotFound(name.to_string()))?;
        let removed = self.apps.remove(index);
        info!("event=app_delete module=store status=ok app={:?}", removed.name);
        Ok(removed)
    }

    /// Removes one group and re-homes its member apps to the ungrouped
    /// bucket.
    ///
    /// Members keep their relative order and are appended after the apps
    /// already ungrouped. Remaining groups are re-stamped to a dense lane
    /// rank so the lane never carries a hole.
    pub fn delete_group(&mut self, name: &str) -> BoardResult<Group> {
        let index = self
            .groups
            .iter()
            .position(|g| g.name == name)
            .ok_or_else(|| BoardError::GroupNotFound(name.to_string()))?;
        let removed = self.groups.remove(index);

        let mut next_rank = self.container_len("");
        let mut members: Vec<&mut App> =
            self.apps.iter_mut().filter(|a| a.group == name).collect();
        members.sort_by_key(|a| a.order);
        let cascade = members.len();
        for app in members {
            app.group.clear();
            app.order = next_rank;
            next_rank += 1;
        }

        for (rank, group) in self.groups.iter_mut().enumerate() {
            group.order = rank;
        }
        info!(
            "event=group_delete module=store status=ok group={:?} rehomed={}",
            removed.name, cascade
        );
        Ok(removed)
    }

    /// Renames one group and re-keys every member app in the same pass.
    ///
    /// No duplicate defense: renaming onto an existing group name leaves two
    /// lane entries sharing a key, and their buckets merge on the next
    /// rebuild. Callers holding a projection must pair this with a bucket
    /// re-key, or the old-name bucket is orphaned and dropped at the next
    /// full flush.
    pub fn rename_group(&mut self, old_name: &str, new_name: &str) -> BoardResult<()> {
        let new_name = new_name.trim();
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.name == old_name)
            .ok_or_else(|| BoardError::GroupNotFound(old_name.to_string()))?;
        group.name = new_name.to_string();
        let mut rekeyed = 0usize;
        for app in self.apps.iter_mut().filter(|a| a.group == old_name) {
            app.group = new_name.to_string();
            rekeyed += 1;
        }
        info!(
            "event=group_rename module=store status=ok from={:?} to={:?} rekeyed={}",
            old_name, new_name, rekeyed
        );
        Ok(())
    }

    /// Replaces a stored app's fields with the candidate's, keyed by name.
    ///
    /// Container membership and rank are preserved from the stored entity;
    /// structural moves go through the sync paths or an edit draft commit.
    pub fn update_app(&mut self, candidate: &App) -> BoardResult<()> {
        let app = self
            .apps
            .iter_mut()
            .find(|a| a.name == candidate.name)
            .ok_or_else(|| BoardError::AppNotFound(candidate.name.clone()))?;
        let group = app.group.clone();
        let order = app.order;
        *app = candidate.clone();
        app.group = group;
        app.order = order;
        Ok(())
    }

    /// Replaces a stored group's display fields, keyed by name.
    ///
    /// Lane rank is preserved; renames go through [`Board::rename_group`].
    pub fn update_group(&mut self, candidate: &Group) -> BoardResult<()> {
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.name == candidate.name)
            .ok_or_else(|| BoardError::GroupNotFound(candidate.name.clone()))?;
        let order = group.order;
        *group = candidate.clone();
        group.order = order;
        Ok(())
    }

    pub(crate) fn app_mut(&mut self, name: &str) -> Option<&mut App> {
        self.apps.iter_mut().find(|a| a.name == name)
    }

    pub(crate) fn group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    pub(crate) fn set_apps(&mut self, apps: Vec<App>) {
        self.apps = apps;
    }

    pub(crate) fn set_groups(&mut self, groups: Vec<Group>) {
        self.groups = groups;
    }
}
