//! Group domain model.

use crate::model::icon::IconRef;
use serde::{Deserialize, Serialize};

/// One named section of the dashboard grid.
///
/// Groups carry no member list; membership lives on each [`crate::model::app::App`]
/// via its `group` field, so a group can be renamed or deleted in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique display name; doubles as the identity key.
    pub name: String,
    /// Rank inside the group lane.
    #[serde(default)]
    pub order: usize,
    /// Icon shown next to the section header.
    #[serde(default)]
    pub icon: IconRef,
    /// Accent color as a CSS color string.
    #[serde(default)]
    pub color: Option<String>,
    /// Whether the section renders expanded.
    #[serde(default = "default_expanded")]
    pub expanded: bool,
}

fn default_expanded() -> bool {
    true
}

impl Group {
    /// Creates a group with display defaults, expanded.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order: 0,
            icon: IconRef::default(),
            color: None,
            expanded: true,
        }
    }
}
