use crate::error::PrefResult;
use crate::schema::{PreferencesPatch, UserPreferences};

/// Where user preferences live.
///
/// Implementations serialize `update` calls, so the provided read-modify-write
/// helpers do not lose concurrent edits.
pub trait UserPreferencesStore: Send + Sync {
    /// Current preferences; defaults when nothing has been stored yet.
    fn load(&self) -> PrefResult<UserPreferences>;

    /// Apply `edit` to the stored preferences and persist the result.
    fn update(&self, edit: &mut dyn FnMut(&mut UserPreferences)) -> PrefResult<UserPreferences>;

    /// Forget everything and return the defaults.
    fn reset(&self) -> PrefResult<UserPreferences>;

    /// Merge a partial update.
    fn save(&self, patch: &PreferencesPatch) -> PrefResult<UserPreferences> {
        self.update(&mut |prefs| prefs.apply(patch))
    }

    fn toggle_favorite(&self, item_id: &str) -> PrefResult<UserPreferences> {
        self.update(&mut |prefs| {
            prefs.toggle_favorite(item_id);
        })
    }
}
