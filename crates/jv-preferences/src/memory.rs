//! In-memory preference store for tests and ephemeral sessions.

use std::sync::RwLock;

use crate::error::PrefResult;
use crate::schema::UserPreferences;
use crate::store::UserPreferencesStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    prefs: RwLock<UserPreferences>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the given preferences instead of the defaults.
    pub fn with_preferences(prefs: UserPreferences) -> Self {
        Self {
            prefs: RwLock::new(prefs),
        }
    }
}

impl UserPreferencesStore for MemoryStore {
    fn load(&self) -> PrefResult<UserPreferences> {
        let prefs = self.prefs.read().unwrap_or_else(|e| e.into_inner());
        Ok(prefs.clone())
    }

    fn update(&self, edit: &mut dyn FnMut(&mut UserPreferences)) -> PrefResult<UserPreferences> {
        let mut prefs = self.prefs.write().unwrap_or_else(|e| e.into_inner());
        edit(&mut prefs);
        Ok(prefs.clone())
    }

    fn reset(&self) -> PrefResult<UserPreferences> {
        let mut prefs = self.prefs.write().unwrap_or_else(|e| e.into_inner());
        *prefs = UserPreferences::default();
        Ok(prefs.clone())
    }
}
