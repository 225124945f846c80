//! First-run setup wizard over a fresh editing session.
//!
//! # Responsibility
//! - Drive initial board assembly: template seeding plus the same
//!   organization operations the settings editor uses.
//! - Emit the completion payload exactly once.
//!
//! # Invariants
//! - The wizard owns its session; there is no store behind it until the
//!   caller persists the completion payload.
//! - `complete` consumes the run; calling it again is an error.

use crate::config::DashboardConfig;
use crate::session::{EditorSession, OrganizeError};
use crate::templates::{CatalogError, TemplateCatalog};
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from wizard-specific operations.
#[derive(Debug)]
pub enum WizardError {
    /// `complete` was already called on this run.
    AlreadyCompleted,
    /// Template lookup or instantiation failed.
    Catalog(CatalogError),
    /// The underlying session operation failed.
    Session(OrganizeError),
}

impl Display for WizardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardError::AlreadyCompleted => write!(f, "setup already completed"),
            WizardError::Catalog(err) => write!(f, "template error: {err}"),
            WizardError::Session(err) => write!(f, "session error: {err}"),
        }
    }
}

impl Error for WizardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WizardError::AlreadyCompleted => None,
            WizardError::Catalog(err) => Some(err),
            WizardError::Session(err) => Some(err),
        }
    }
}

impl From<CatalogError> for WizardError {
    fn from(err: CatalogError) -> Self {
        WizardError::Catalog(err)
    }
}

impl From<OrganizeError> for WizardError {
    fn from(err: OrganizeError) -> Self {
        WizardError::Session(err)
    }
}

/// Onboarding facade wrapping one editing session over an empty board.
///
/// The embedded session is the same engine the settings editor runs, so
/// everything assembled here behaves identically after first save.
#[derive(Debug)]
pub struct SetupWizard {
    session: EditorSession,
    catalog: TemplateCatalog,
    completed: bool,
}

impl SetupWizard {
    /// Starts a wizard run with the built-in template catalog.
    pub fn new() -> Self {
        Self::with_catalog(TemplateCatalog::builtin())
    }

    /// Starts a wizard run with a caller-provided catalog.
    pub fn with_catalog(catalog: TemplateCatalog) -> Self {
        Self {
            session: EditorSession::new(),
            catalog,
            completed: false,
        }
    }

    /// The shared organization engine behind this run.
    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Adds one app from a catalog template.
    ///
    /// The candidate passes the regular add gate, so a duplicate name or a
    /// template whose substitutions produced a bad URL fails the same way a
    /// hand-typed submission would.
    pub fn add_from_template(
        &mut self,
        template_id: &str,
        substitutions: &BTreeMap<String, String>,
    ) -> Result<(), WizardError> {
        let candidate = self.catalog.instantiate(template_id, substitutions)?;
        self.session.submit_new_app(candidate)?;
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Finishes onboarding: flushes the layout and returns the full config
    /// payload for the caller to persist.
    pub fn complete(&mut self) -> Result<DashboardConfig, WizardError> {
        if self.completed {
            return Err(WizardError::AlreadyCompleted);
        }
        self.session.flush_layout()?;
        let config = self.session.assemble_config();
        self.completed = true;
        info!(
            "event=wizard_complete module=wizard status=ok apps={} groups={}",
            config.apps.len(),
            config.groups.len()
        );
        Ok(config)
    }
}

impl Default for SetupWizard {
    fn default() -> Self {
        Self::new()
    }
}
