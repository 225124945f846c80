//! Pre-filled app templates for the add flow and the setup wizard.
//!
//! # Responsibility
//! - Register templates under stable ids and list them for pickers.
//! - Instantiate app candidates, substituting `{placeholder}` URL slots.
//!
//! # Invariants
//! - Template ids are lowercase `a-z0-9` with `-`/`_`, unique per catalog.
//! - Instantiated candidates are ungrouped with rank `0`; add paths stamp
//!   the real container rank.

use crate::model::app::{App, OpenMode};
use crate::model::icon::IconRef;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z][a-z0-9_]*)\}").expect("placeholder regex compiles"));

/// Errors from catalog registration and instantiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Id is empty or carries characters outside the allowed set.
    InvalidTemplateId(String),
    /// A template with this id is already registered.
    DuplicateTemplateId(String),
    /// No template registered under the given id.
    TemplateNotFound(String),
    /// The URL pattern names a placeholder with no substitution supplied.
    MissingPlaceholder {
        template_id: String,
        placeholder: String,
    },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::InvalidTemplateId(id) => write!(f, "invalid template id: {id}"),
            CatalogError::DuplicateTemplateId(id) => {
                write!(f, "template id already registered: {id}")
            }
            CatalogError::TemplateNotFound(id) => write!(f, "template not found: {id}"),
            CatalogError::MissingPlaceholder {
                template_id,
                placeholder,
            } => write!(
                f,
                "template {template_id} needs a value for placeholder {{{placeholder}}}"
            ),
        }
    }
}

impl Error for CatalogError {}

/// One registered app template.
#[derive(Debug, Clone, PartialEq)]
pub struct AppTemplate {
    /// Stable catalog key, e.g. `jellyfin`.
    pub id: String,
    /// Display name for the created app.
    pub name: String,
    /// URL pattern; `{host}`-style slots are filled at instantiation.
    pub url_pattern: String,
    /// Suggested icon.
    pub icon: IconRef,
    /// Suggested accent color.
    pub color: Option<String>,
    /// Suggested open mode.
    pub open_mode: OpenMode,
}

/// Registry of templates offered by the add-app flow.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, AppTemplate>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-loaded with well-known self-hosted services.
    pub fn builtin() -> Self {
        let mut templates = BTreeMap::new();
        for template in builtin_templates() {
            templates.insert(template.id.clone(), template);
        }
        Self { templates }
    }

    /// Registers one template under its id.
    pub fn register(&mut self, template: AppTemplate) -> Result<(), CatalogError> {
        if !is_valid_template_id(&template.id) {
            return Err(CatalogError::InvalidTemplateId(template.id.clone()));
        }
        if self.templates.contains_key(&template.id) {
            return Err(CatalogError::DuplicateTemplateId(template.id.clone()));
        }
        self.templates.insert(template.id.clone(), template);
        Ok(())
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<&AppTemplate> {
        self.templates.get(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Builds an app candidate from one template.
    ///
    /// `substitutions` maps placeholder names to values, e.g. `host` to
    /// `nas.local`. The candidate still passes through the regular add gate,
    /// so a template with a bad pattern fails at submission, not here.
    pub fn instantiate(
        &self,
        id: &str,
        substitutions: &BTreeMap<String, String>,
    ) -> Result<App, CatalogError> {
        let template = self
            .get(id)
            .ok_or_else(|| CatalogError::TemplateNotFound(id.to_string()))?;
        let url = substitute_placeholders(&template.id, &template.url_pattern, substitutions)?;
        let mut app = App::new(template.name.clone(), url);
        app.icon = template.icon.clone();
        app.color = template.color.clone();
        app.open_mode = template.open_mode;
        Ok(app)
    }
}

fn is_valid_template_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

fn substitute_placeholders(
    template_id: &str,
    pattern: &str,
    substitutions: &BTreeMap<String, String>,
) -> Result<String, CatalogError> {
    let mut missing: Option<String> = None;
    let filled = PLACEHOLDER_RE.replace_all(pattern, |caps: &regex::Captures<'_>| {
        let key = &caps[1];
        match substitutions.get(key) {
            Some(value) => value.clone(),
            None => {
                if missing.is_none() {
                    missing = Some(key.to_string());
                }
                String::new()
            }
        }
    });
    match missing {
        Some(placeholder) => Err(CatalogError::MissingPlaceholder {
            template_id: template_id.to_string(),
            placeholder,
        }),
        None => Ok(filled.into_owned()),
    }
}

fn builtin_templates() -> Vec<AppTemplate> {
    let entry = |id: &str, name: &str, url_pattern: &str, color: &str| AppTemplate {
        id: id.to_string(),
        name: name.to_string(),
        url_pattern: url_pattern.to_string(),
        icon: IconRef::new(id, "color", "builtin"),
        color: Some(color.to_string()),
        open_mode: OpenMode::Embed,
    };
    vec![
        entry("plex", "Plex", "http://{host}:32400/web", "#e5a00d"),
        entry("jellyfin", "Jellyfin", "http://{host}:8096", "#aa5cc3"),
        entry("sonarr", "Sonarr", "http://{host}:8989", "#35c5f4"),
        entry("radarr", "Radarr", "http://{host}:7878", "#ffc230"),
        entry(
            "home-assistant",
            "Home Assistant",
            "http://{host}:8123",
            "#41bdf5",
        ),
        entry("pihole", "Pi-hole", "http://{host}/admin", "#f60d1a"),
    ]
}
