//! User preference storage for the Jarvis dashboard.
//!
//! Preferences (display name, role, favorites, panel layout) are a single
//! versioned JSON document. `UserPreferencesStore` abstracts where that
//! document lives: `JsonFileStore` on disk, `MemoryStore` for tests.

pub mod error;
pub mod file;
pub mod memory;
pub mod schema;
pub mod store;

pub use error::{PrefError, PrefResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use schema::{DashboardLayout, LayoutPatch, PreferencesPatch, SCHEMA_VERSION, UserPreferences};
pub use store::UserPreferencesStore;
