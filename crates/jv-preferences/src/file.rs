//! JSON file-backed preference store.
//!
//! The whole document is rewritten on each update (temp file + rename).
//! Unreadable JSON is treated like a missing file: the defaults are used
//! and the next update overwrites it.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{PrefError, PrefResult};
use crate::schema::{SCHEMA_VERSION, UserPreferences};
use crate::store::UserPreferencesStore;

pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> PrefResult<UserPreferences> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(UserPreferences::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut prefs: UserPreferences = match serde_json::from_str(&contents) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "unreadable preferences file, using defaults"
                );
                return Ok(UserPreferences::default());
            }
        };

        if prefs.schema_version > SCHEMA_VERSION {
            return Err(PrefError::UnsupportedVersion {
                found: prefs.schema_version,
                supported: SCHEMA_VERSION,
            });
        }
        if prefs.schema_version < SCHEMA_VERSION {
            tracing::info!(
                path = %self.path.display(),
                from = prefs.schema_version,
                to = SCHEMA_VERSION,
                "migrating preferences schema"
            );
            prefs.schema_version = SCHEMA_VERSION;
        }

        Ok(prefs)
    }

    fn write(&self, prefs: &UserPreferences) -> PrefResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(prefs)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl UserPreferencesStore for JsonFileStore {
    fn load(&self) -> PrefResult<UserPreferences> {
        self.read()
    }

    fn update(&self, edit: &mut dyn FnMut(&mut UserPreferences)) -> PrefResult<UserPreferences> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut prefs = self.read()?;
        edit(&mut prefs);
        self.write(&prefs)?;
        Ok(prefs)
    }

    fn reset(&self) -> PrefResult<UserPreferences> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(UserPreferences::default())
    }
}
