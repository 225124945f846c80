//! Icon descriptors shared by apps and groups.

use serde::{Deserialize, Serialize};

/// Reference to one icon as chosen in the icon browser.
///
/// The descriptor is resolution-free: pack lookup and asset fetching happen
/// in the rendering layer. An empty `name` means no icon is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRef {
    /// Icon identifier inside its pack, e.g. `server` or `jellyfin`.
    #[serde(default)]
    pub name: String,
    /// Pack-specific style variant, e.g. `solid` or `outline`.
    #[serde(default)]
    pub variant: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl IconRef {
    /// Creates a descriptor from its three coordinates.
    pub fn new(
        name: impl Into<String>,
        variant: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            variant: variant.into(),
            kind: kind.into(),
        }
    }

    /// Returns whether no icon is assigned.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// Selection payload produced by the visual icon picker.
///
/// Shape matches [`IconRef`] on purpose; kept as a separate type so picker
/// integrations can grow fields without touching stored entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSelection {
    pub name: String,
    pub variant: String,
    pub kind: String,
}

impl From<IconSelection> for IconRef {
    fn from(selection: IconSelection) -> Self {
        Self {
            name: selection.name,
            variant: selection.variant,
            kind: selection.kind,
        }
    }
}
