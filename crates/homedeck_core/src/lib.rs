//! Board organization engine for the HomeDeck dashboard.
//! This crate is the single source of truth for layout invariants.

pub mod config;
pub mod edit;
pub mod logging;
pub mod model;
pub mod session;
pub mod store;
pub mod sync;
pub mod templates;
pub mod validate;
pub mod view;
pub mod wizard;

pub use config::{
    export_config, parse_config, ConfigError, ConfigResult, ConfigStore, DashboardConfig,
    JsonFileStore,
};
pub use edit::{AppDraft, GroupDraft};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::app::{App, OpenMode};
pub use model::group::Group;
pub use model::icon::{IconRef, IconSelection};
pub use session::{EditorSession, ImportSummary, OrganizeError, SessionResult};
pub use store::board::{Board, BoardError, BoardResult};
pub use sync::{flush_bucket, flush_group_order, flush_view};
pub use templates::{AppTemplate, CatalogError, TemplateCatalog};
pub use validate::{shortcut_conflict, validate_app, validate_group, FieldErrors};
pub use view::projection::{BoardView, UNGROUPED};
pub use wizard::{SetupWizard, WizardError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
