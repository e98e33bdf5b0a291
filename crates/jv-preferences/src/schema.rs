//! Preference document schema.
//!
//! Version 1 uses snake_case keys and an explicit `schema_version`. Documents
//! without a version are the older camelCase layout (version 0); aliases
//! below let them deserialize directly, and their stored `isFirstVisit`
//! flag is ignored because first-visit is derived from the name.

use serde::{Deserialize, Serialize};

/// Current on-disk schema version.
pub const SCHEMA_VERSION: u32 = 1;

fn default_role() -> String {
    "Level 3 Administrator".to_string()
}

fn default_favorites() -> Vec<String> {
    ["cost-explorer", "carbon-footprint", "deploy-status"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_true() -> bool {
    true
}

/// Which dashboard panels are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardLayout {
    #[serde(default = "default_true", alias = "metricsVisible")]
    pub metrics_visible: bool,
    #[serde(default = "default_true", alias = "favoritesVisible")]
    pub favorites_visible: bool,
    #[serde(default = "default_true", alias = "activityVisible")]
    pub activity_visible: bool,
    #[serde(default = "default_true", alias = "productsVisible")]
    pub products_visible: bool,
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self {
            metrics_visible: true,
            favorites_visible: true,
            activity_visible: true,
            products_visible: true,
        }
    }
}

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Missing in legacy documents, which deserialize as version 0.
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_true", alias = "verifiedAccess")]
    pub verified_access: bool,
    #[serde(default = "default_favorites")]
    pub favorites: Vec<String>,
    #[serde(default, alias = "dashboardLayout")]
    pub dashboard_layout: DashboardLayout,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            name: String::new(),
            role: default_role(),
            verified_access: true,
            favorites: default_favorites(),
            dashboard_layout: DashboardLayout::default(),
        }
    }
}

impl UserPreferences {
    /// A user who has not told us their name yet.
    pub fn is_first_visit(&self) -> bool {
        self.name.trim().is_empty()
    }

    /// Merge every field set in `patch`.
    pub fn apply(&mut self, patch: &PreferencesPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(role) = &patch.role {
            self.role = role.clone();
        }
        if let Some(verified) = patch.verified_access {
            self.verified_access = verified;
        }
        if let Some(favorites) = &patch.favorites {
            self.favorites = favorites.clone();
        }
        if let Some(layout) = &patch.dashboard_layout {
            layout.apply(&mut self.dashboard_layout);
        }
    }

    /// Add or remove `item_id` from favorites. Returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, item_id: &str) -> bool {
        if let Some(pos) = self.favorites.iter().position(|f| f == item_id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(item_id.to_string());
            true
        }
    }
}

/// Partial update for `UserPreferences`; `None` fields are left alone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_access: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_layout: Option<LayoutPatch>,
}

impl PreferencesPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Partial update for `DashboardLayout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products_visible: Option<bool>,
}

impl LayoutPatch {
    fn apply(&self, layout: &mut DashboardLayout) {
        if let Some(v) = self.metrics_visible {
            layout.metrics_visible = v;
        }
        if let Some(v) = self.favorites_visible {
            layout.favorites_visible = v;
        }
        if let Some(v) = self.activity_visible {
            layout.activity_visible = v;
        }
        if let Some(v) = self.products_visible {
            layout.products_visible = v;
        }
    }
}
