//! Field-level validation for add and edit submissions.
//!
//! # Responsibility
//! - Check entity schemas before any canonical mutation.
//! - Report failures as a field-to-message map the form layer can merge.
//!
//! # Invariants
//! - Validation never mutates the candidate.
//! - Messages are short user-facing sentences, one per field.

use crate::model::app::App;
use crate::model::group::Group;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

/// Field-keyed validation failures for one submission.
///
/// Forms render each message next to its field and merge new maps over old
/// ones on resubmission. An empty map means the submission passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one failure. A later message for the same field wins.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    /// Clears one field's failure, e.g. while the user retypes it.
    ///
    /// Returns whether a message was present.
    pub fn clear(&mut self, field: &str) -> bool {
        self.errors.remove(field).is_some()
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Field/message pairs in stable field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Converts the map into a gate decision: `Err(self)` when non-empty.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

/// Checks the app schema: non-blank name and an absolute URL.
///
/// Uniqueness and container membership are store concerns and checked there;
/// this gate looks at the candidate alone.
pub fn validate_app(app: &App) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if app.name.trim().is_empty() {
        errors.push("name", "name must not be blank");
    }
    if Url::parse(app.url.trim()).is_err() {
        errors.push("url", "must be an absolute URL, e.g. http://host:8080");
    }
    errors
}

/// Checks the group schema: non-blank name.
pub fn validate_group(group: &Group) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if group.name.trim().is_empty() {
        errors.push("name", "name must not be blank");
    }
    errors
}

/// Returns the name of another app already holding `app`'s shortcut digit.
///
/// `None` when the candidate has no shortcut or the digit is free. Entries
/// sharing the candidate's name are skipped so editing an app does not
/// conflict with itself.
pub fn shortcut_conflict<'a>(
    app: &App,
    others: impl IntoIterator<Item = &'a App>,
) -> Option<&'a str> {
    let digit = app.shortcut?;
    others
        .into_iter()
        .find(|other| other.name != app.name && other.shortcut == Some(digit))
        .map(|other| other.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_gate_requires_name_and_absolute_url() {
        let app = App::new("  ", "plex");
        let errors = validate_app(&app);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("name must not be blank"));
        assert!(errors.get("url").is_some());
    }

    #[test]
    fn app_gate_accepts_absolute_url() {
        let app = App::new("Plex", "http://nas.local:32400/web");
        assert!(validate_app(&app).is_empty());
    }

    #[test]
    fn app_gate_trims_before_checking() {
        let app = App::new("Plex", "  http://nas.local:32400  ");
        assert!(validate_app(&app).is_empty());
    }

    #[test]
    fn group_gate_requires_name() {
        let group = Group::new("   ");
        let errors = validate_group(&group);
        assert_eq!(errors.get("name"), Some("name must not be blank"));
    }

    #[test]
    fn shortcut_conflict_finds_holder_and_skips_self() {
        let mut plex = App::new("Plex", "http://nas.local:32400");
        plex.shortcut = Some(1);
        let mut sonarr = App::new("Sonarr", "http://nas.local:8989");
        sonarr.shortcut = Some(1);

        let held = [plex.clone(), sonarr.clone()];
        assert_eq!(shortcut_conflict(&sonarr, &held), Some("Plex"));

        sonarr.shortcut = Some(2);
        assert_eq!(shortcut_conflict(&sonarr, &held[..1]), None);
        assert_eq!(shortcut_conflict(&plex, &held[..1]), None);
    }

    #[test]
    fn clear_removes_a_single_field() {
        let mut errors = FieldErrors::new();
        errors.push("name", "name must not be blank");
        errors.push("url", "must be an absolute URL");
        assert!(errors.clear("url"));
        assert!(!errors.clear("url"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn display_joins_fields_in_stable_order() {
        let mut errors = FieldErrors::new();
        errors.push("url", "must be an absolute URL");
        errors.push("name", "name must not be blank");
        assert_eq!(
            errors.to_string(),
            "name: name must not be blank; url: must be an absolute URL"
        );
    }
}
