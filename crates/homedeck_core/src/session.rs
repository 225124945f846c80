//! Editing-session facade over the board, projection and sync paths.
//!
//! # Responsibility
//! - Expose the add/edit/delete/reorder operations settings surfaces call.
//! - Enforce the gesture discipline: no canonical rebuild while a drag
//!   holds unflushed consider-state.
//! - Stage config imports and assemble the confirmed save payload.
//!
//! # Invariants
//! - Every successful mutation leaves board and projection in step.
//! - Validation failures and staged imports mutate nothing.
//! - Collaborators (`ConfigStore`) run only from `confirm_save`.

use crate::config::{parse_config, ConfigError, ConfigStore, DashboardConfig};
use crate::edit::{AppDraft, GroupDraft};
use crate::model::app::App;
use crate::model::group::Group;
use crate::store::board::{Board, BoardError};
use crate::sync;
use crate::validate::{self, FieldErrors};
use crate::view::projection::BoardView;
use log::{debug, info};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, OrganizeError>;

/// Errors surfaced by editing-session operations.
#[derive(Debug)]
pub enum OrganizeError {
    /// Submission failed the validation gate; the map is field to message.
    Invalid(FieldErrors),
    /// No app stored under the given name.
    AppNotFound(String),
    /// No group stored under the given name.
    GroupNotFound(String),
    /// A drag gesture holds unflushed consider-state; finish or discard it
    /// before mutating the board.
    GestureInFlight,
    /// No staged import to apply or discard.
    NoPendingImport,
    /// Config collaborator failure, parse or persistence.
    Config(ConfigError),
}

impl Display for OrganizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OrganizeError::Invalid(errors) => write!(f, "validation failed: {errors}"),
            OrganizeError::AppNotFound(name) => write!(f, "app not found: {name}"),
            OrganizeError::GroupNotFound(name) => write!(f, "group not found: {name}"),
            OrganizeError::GestureInFlight => {
                write!(f, "a drag gesture is in flight; finish it first")
            }
            OrganizeError::NoPendingImport => write!(f, "no staged import"),
            OrganizeError::Config(err) => write!(f, "config error: {err}"),
        }
    }
}

impl Error for OrganizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            OrganizeError::Invalid(errors) => Some(errors),
            OrganizeError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldErrors> for OrganizeError {
    fn from(errors: FieldErrors) -> Self {
        OrganizeError::Invalid(errors)
    }
}

impl From<BoardError> for OrganizeError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::AppNotFound(name) => OrganizeError::AppNotFound(name),
            BoardError::GroupNotFound(name) => OrganizeError::GroupNotFound(name),
        }
    }
}

impl From<ConfigError> for OrganizeError {
    fn from(err: ConfigError) -> Self {
        OrganizeError::Config(err)
    }
}

/// Counts shown in the import confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub apps: usize,
    pub groups: usize,
}

/// One editing session over a dashboard configuration.
///
/// Constructed per settings visit or wizard run, held by one surface at a
/// time and dropped on close. There is no global instance; closing without
/// [`EditorSession::confirm_save`] discards every change.
#[derive(Debug, Default)]
pub struct EditorSession {
    board: Board,
    view: BoardView,
    pending_import: Option<DashboardConfig>,
    navigation: Value,
    theme: Value,
}

impl EditorSession {
    /// Opens a session over an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session over a loaded config.
    ///
    /// The load runs a full flush so ranks from hand-edited or older files
    /// come out dense before the first gesture.
    pub fn from_config(config: DashboardConfig) -> Self {
        let DashboardConfig {
            apps,
            groups,
            navigation,
            theme,
        } = config;
        let mut session = Self {
            board: Board::from_parts(apps, groups),
            view: BoardView::new(),
            pending_import: None,
            navigation,
            theme,
        };
        session.full_sync();
        info!(
            "event=session_open module=session status=ok apps={} groups={}",
            session.board.apps().len(),
            session.board.groups().len()
        );
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn navigation(&self) -> &Value {
        &self.navigation
    }

    pub fn set_navigation(&mut self, navigation: Value) {
        self.navigation = navigation;
    }

    pub fn theme(&self) -> &Value {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Value) {
        self.theme = theme;
    }

    /// Validates and adds one app, then re-derives the projection.
    ///
    /// The shortcut-digit conflict check runs here, in modal scope, and is
    /// merged into the same field map as the schema and uniqueness checks so
    /// the form shows everything at once.
    pub fn submit_new_app(&mut self, candidate: App) -> SessionResult<()> {
        self.ensure_no_gesture()?;
        let mut errors = self.board.check_new_app(&candidate);
        if let Some(holder) = validate::shortcut_conflict(&candidate, self.board.apps()) {
            errors.push("shortcut", format!("digit already assigned to {holder}"));
        }
        errors.into_result()?;
        self.board.add_app(candidate)?;
        self.refresh();
        Ok(())
    }

    /// Validates and adds one group, then re-derives the projection.
    pub fn submit_new_group(&mut self, candidate: Group) -> SessionResult<()> {
        self.ensure_no_gesture()?;
        self.board.add_group(candidate)?;
        self.refresh();
        Ok(())
    }

    /// Deletes one app and re-derives the projection.
    pub fn delete_app(&mut self, name: &str) -> SessionResult<App> {
        self.ensure_no_gesture()?;
        let removed = self.board.delete_app(name)?;
        self.refresh();
        Ok(removed)
    }

    /// Deletes one group; members re-home after the existing ungrouped apps.
    pub fn delete_group(&mut self, name: &str) -> SessionResult<Group> {
        self.ensure_no_gesture()?;
        let removed = self.board.delete_group(name)?;
        self.refresh();
        Ok(removed)
    }

    /// Renames a group, re-keying member apps and the projection bucket as
    /// one step.
    ///
    /// Safe mid-gesture: the bucket moves under the new key without a
    /// rebuild, so unflushed consider-state survives an inline rename.
    pub fn rename_group(&mut self, old_name: &str, new_name: &str) -> SessionResult<()> {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            let mut errors = FieldErrors::new();
            errors.push("name", "name must not be blank");
            return Err(OrganizeError::Invalid(errors));
        }
        self.board.rename_group(old_name, trimmed)?;
        self.view.rekey_bucket(old_name, trimmed);
        Ok(())
    }

    /// Opens an edit draft for one app.
    pub fn begin_app_edit(&self, name: &str) -> SessionResult<AppDraft> {
        self.board
            .app(name)
            .map(AppDraft::new)
            .ok_or_else(|| OrganizeError::AppNotFound(name.to_string()))
    }

    /// Opens an edit draft for one group.
    pub fn begin_group_edit(&self, name: &str) -> SessionResult<GroupDraft> {
        self.board
            .group(name)
            .map(GroupDraft::new)
            .ok_or_else(|| OrganizeError::GroupNotFound(name.to_string()))
    }

    /// Commits an app draft: gate, conflict checks, by-value write-back.
    ///
    /// On failure nothing changes and the draft stays open for correction.
    /// On success the whole layout is flushed, so a container move picks up
    /// dense ranks immediately.
    pub fn commit_app_edit(&mut self, draft: &AppDraft) -> SessionResult<()> {
        self.ensure_no_gesture()?;
        if !self.board.has_app(draft.original_name()) {
            return Err(OrganizeError::AppNotFound(draft.original_name().to_string()));
        }

        let mut errors = validate::validate_app(&draft.app);
        let new_name = draft.app.name.trim().to_string();
        if draft.renames() && self.board.has_app(&new_name) {
            errors.push("name", "an app with this name already exists");
        }
        if !draft.app.group.is_empty() && !self.board.has_group(&draft.app.group) {
            errors.push("group", "group does not exist");
        }
        let others = self
            .board
            .apps()
            .iter()
            .filter(|a| a.name != draft.original_name());
        if let Some(holder) = validate::shortcut_conflict(&draft.app, others) {
            errors.push("shortcut", format!("digit already assigned to {holder}"));
        }
        errors.into_result()?;

        let renamed = draft.renames();
        if let Some(stored) = self.board.app_mut(draft.original_name()) {
            let order = stored.order;
            *stored = draft.app.clone();
            stored.name = new_name;
            stored.url = stored.url.trim().to_string();
            stored.order = order;
        }
        self.full_sync();
        info!(
            "event=app_commit module=session status=ok app={:?} renamed={}",
            draft.original_name(),
            renamed
        );
        Ok(())
    }

    /// Commits a group draft: gate, by-value write-back, rename cascade.
    ///
    /// Renaming onto an existing group name is not rejected; the buckets
    /// merge, mirroring what the store documents for `rename_group`.
    pub fn commit_group_edit(&mut self, draft: &GroupDraft) -> SessionResult<()> {
        self.ensure_no_gesture()?;
        if !self.board.has_group(draft.original_name()) {
            return Err(OrganizeError::GroupNotFound(
                draft.original_name().to_string(),
            ));
        }
        validate::validate_group(&draft.group).into_result()?;

        let new_name = draft.group.name.trim().to_string();
        if let Some(stored) = self.board.group_mut(draft.original_name()) {
            let order = stored.order;
            *stored = draft.group.clone();
            stored.name = draft.original_name().to_string();
            stored.order = order;
        }
        if draft.renames() {
            self.board.rename_group(draft.original_name(), &new_name)?;
            self.view.rekey_bucket(draft.original_name(), &new_name);
        }
        self.full_sync();
        info!(
            "event=group_commit module=session status=ok group={:?} renamed={}",
            draft.original_name(),
            draft.renames()
        );
        Ok(())
    }

    /// Mid-drag bucket replacement. Visual only; raises the scratch flag.
    pub fn consider_bucket(&mut self, group_name: &str, items: Vec<App>) {
        self.view.consider_bucket(group_name, items);
    }

    /// Mid-drag lane replacement. Visual only; raises the scratch flag.
    pub fn consider_group_order(&mut self, groups: Vec<Group>) {
        self.view.consider_group_order(groups);
    }

    /// Drop-finalize for one bucket: folds the final order into the board
    /// and re-derives the projection, clearing the scratch flag.
    ///
    /// A cross-group drop fires this twice, once for the source bucket and
    /// once for the target; both end dense.
    pub fn finalize_bucket(&mut self, group_name: &str, items: Vec<App>) {
        sync::flush_bucket(&mut self.board, group_name, &items);
        self.refresh();
        debug!(
            "event=bucket_finalize module=session status=ok group={:?}",
            group_name
        );
    }

    /// Drop-finalize for the group lane.
    pub fn finalize_group_order(&mut self, groups: Vec<Group>) {
        sync::flush_group_order(&mut self.board, &groups);
        self.refresh();
        debug!("event=lane_finalize module=session status=ok");
    }

    /// Parses an import payload and stages it behind a confirmation.
    ///
    /// The board is untouched until [`EditorSession::apply_import`]; a parse
    /// failure stages nothing. Staging is allowed mid-gesture because it
    /// only parses.
    pub fn stage_import(&mut self, text: &str) -> SessionResult<ImportSummary> {
        let config = parse_config(text)?;
        let summary = ImportSummary {
            apps: config.apps.len(),
            groups: config.groups.len(),
        };
        info!(
            "event=import_stage module=session status=ok apps={} groups={}",
            summary.apps, summary.groups
        );
        self.pending_import = Some(config);
        Ok(summary)
    }

    /// Applies the staged import, replacing the whole config. Never a merge.
    pub fn apply_import(&mut self) -> SessionResult<ImportSummary> {
        self.ensure_no_gesture()?;
        let config = self
            .pending_import
            .take()
            .ok_or(OrganizeError::NoPendingImport)?;
        let summary = ImportSummary {
            apps: config.apps.len(),
            groups: config.groups.len(),
        };
        self.navigation = config.navigation;
        self.theme = config.theme;
        self.board = Board::from_parts(config.apps, config.groups);
        self.full_sync();
        info!(
            "event=import_apply module=session status=ok apps={} groups={}",
            summary.apps, summary.groups
        );
        Ok(summary)
    }

    /// Drops a staged import without touching the board.
    pub fn discard_import(&mut self) -> SessionResult<()> {
        match self.pending_import.take() {
            Some(_) => {
                info!("event=import_discard module=session status=ok");
                Ok(())
            }
            None => Err(OrganizeError::NoPendingImport),
        }
    }

    pub fn has_pending_import(&self) -> bool {
        self.pending_import.is_some()
    }

    /// Folds the projection into the board and re-derives it, leaving every
    /// container densely ranked.
    pub fn flush_layout(&mut self) -> SessionResult<()> {
        self.ensure_no_gesture()?;
        self.full_sync();
        Ok(())
    }

    /// Assembles the full config payload from current state.
    ///
    /// Pure read; export flows call this and serialize the result.
    pub fn assemble_config(&self) -> DashboardConfig {
        DashboardConfig {
            apps: self.board.apps().to_vec(),
            groups: self.board.groups().to_vec(),
            navigation: self.navigation.clone(),
            theme: self.theme.clone(),
        }
    }

    /// Final save: flushes the layout, persists through the store and
    /// returns the saved payload.
    pub fn confirm_save(&mut self, store: &mut dyn ConfigStore) -> SessionResult<DashboardConfig> {
        self.flush_layout()?;
        let config = self.assemble_config();
        store.save(&config)?;
        info!(
            "event=config_save module=session status=ok apps={} groups={}",
            config.apps.len(),
            config.groups.len()
        );
        Ok(config)
    }

    fn ensure_no_gesture(&self) -> SessionResult<()> {
        if self.view.has_scratch() {
            return Err(OrganizeError::GestureInFlight);
        }
        Ok(())
    }

    /// Re-derives the projection after a canonical mutation.
    fn refresh(&mut self) {
        self.view.rebuild(&self.board);
    }

    /// Rebuild, fold back, rebuild: the full-sync cycle that closes rank
    /// holes and lays the flat list out bucket-contiguously.
    fn full_sync(&mut self) {
        self.view.rebuild(&self.board);
        sync::flush_view(&mut self.board, &self.view);
        self.view.rebuild(&self.board);
    }
}
