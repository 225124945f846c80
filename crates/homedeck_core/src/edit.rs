//! Modal edit drafts for apps and groups.
//!
//! # Responsibility
//! - Carry a deep copy of the entity under edit plus its original identity.
//! - Absorb icon-picker selections without touching canonical state.
//!
//! # Invariants
//! - A draft never aliases canonical storage; cancel is dropping the draft.
//! - `original_name` stays the commit key even after the form renames the
//!   working copy.

use crate::model::app::App;
use crate::model::group::Group;
use crate::model::icon::IconSelection;

/// In-flight edit of one app.
///
/// The form binds to `app` directly; validation runs only on commit, so the
/// working copy may hold arbitrary intermediate input.
#[derive(Debug, Clone, PartialEq)]
pub struct AppDraft {
    original_name: String,
    /// Form-bound working copy.
    pub app: App,
}

impl AppDraft {
    pub(crate) fn new(stored: &App) -> Self {
        Self {
            original_name: stored.name.clone(),
            app: stored.clone(),
        }
    }

    /// Identity key of the stored entity this draft edits.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Whether the form has renamed the entity.
    pub fn renames(&self) -> bool {
        self.app.name.trim() != self.original_name
    }

    /// Replaces the draft icon with a picker selection.
    pub fn apply_icon(&mut self, selection: IconSelection) {
        self.app.icon = selection.into();
    }
}

/// In-flight edit of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDraft {
    original_name: String,
    /// Form-bound working copy.
    pub group: Group,
}

impl GroupDraft {
    pub(crate) fn new(stored: &Group) -> Self {
        Self {
            original_name: stored.name.clone(),
            group: stored.clone(),
        }
    }

    /// Identity key of the stored entity this draft edits.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Whether the form has renamed the entity.
    pub fn renames(&self) -> bool {
        self.group.name.trim() != self.original_name
    }

    /// Replaces the draft icon with a picker selection.
    pub fn apply_icon(&mut self, selection: IconSelection) {
        self.group.icon = selection.into();
    }
}
