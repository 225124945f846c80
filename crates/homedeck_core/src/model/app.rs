//! App domain model.
//!
//! # Responsibility
//! - Define the launchable-service record managed by the board.
//! - Provide constructor helpers used by add flows and templates.
//!
//! # Invariants
//! - `name` is the identity key; two stored apps never share one.
//! - `group` is `""` (ungrouped) or the name of a stored group.
//! - `order` is a dense rank within the app's container, not a global one.

use crate::model::icon::IconRef;
use serde::{Deserialize, Serialize};

/// How the dashboard opens an app when it is activated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenMode {
    /// Render inside the dashboard's embedded frame.
    #[default]
    Embed,
    /// Open a fresh browser tab.
    NewTab,
    /// Replace the dashboard tab.
    SameTab,
}

/// One launchable external service tile.
///
/// Display and behavior fields are optional with serde defaults so partial
/// config payloads stay importable across schema additions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    /// Unique display name; doubles as the identity key.
    pub name: String,
    /// Absolute URL of the service.
    pub url: String,
    /// Owning group name; `""` means ungrouped.
    #[serde(default)]
    pub group: String,
    /// Rank inside the owning container.
    #[serde(default)]
    pub order: usize,
    /// Icon shown on the tile.
    #[serde(default)]
    pub icon: IconRef,
    /// Accent color as a CSS color string.
    #[serde(default)]
    pub color: Option<String>,
    /// Activation behavior.
    #[serde(default)]
    pub open_mode: OpenMode,
    /// Zoom factor applied to embedded rendering.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Route requests through the built-in reverse proxy.
    #[serde(default)]
    pub proxied: bool,
    /// Proxy websocket upgrades as well. Meaningful only when `proxied`.
    #[serde(default)]
    pub proxy_websockets: bool,
    /// Keyboard launch digit, `0..=9`.
    #[serde(default)]
    pub shortcut: Option<u8>,
    /// Minimum role required to see the tile.
    #[serde(default)]
    pub min_role: Option<String>,
    /// Override URL for availability probing.
    #[serde(default)]
    pub health_check: Option<String>,
    /// Open this app when the dashboard loads.
    #[serde(default)]
    pub default: bool,
}

fn default_scale() -> f64 {
    1.0
}

impl App {
    /// Creates an ungrouped app with display defaults.
    ///
    /// # Invariants
    /// - `order` starts at `0`; add paths stamp the real container rank.
    /// - No validation happens here; the gate runs on submission.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            group: String::new(),
            order: 0,
            icon: IconRef::default(),
            color: None,
            open_mode: OpenMode::default(),
            scale: default_scale(),
            proxied: false,
            proxy_websockets: false,
            shortcut: None,
            min_role: None,
            health_check: None,
            default: false,
        }
    }

    /// Returns whether the app sits in the ungrouped bucket.
    pub fn is_ungrouped(&self) -> bool {
        self.group.is_empty()
    }
}
