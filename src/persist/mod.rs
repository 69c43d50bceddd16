//! Persisted view state
//!
//! The viewer remembers its orientation, zoom, star factor, display toggles
//! and color scheme between sessions as plain string values in a
//! [`StateStore`]. Reading is forgiving: a missing or malformed value falls
//! back to its default and the rest of the state still loads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::quaternion::Quaternion;
use crate::ui::UiFlags;
use crate::Result;

pub const QUATERNION_KEY: &str = "quaternion";
pub const ZOOM_KEY: &str = "zoom";
pub const STAR_FACTOR_KEY: &str = "starFactor";
pub const UI_KEY: &str = "ui";
pub const COLOR_SCHEME_KEY: &str = "colorSchemeName";

/// String key/value storage for view state
pub trait StateStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object on disk, rewritten on every change
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file starts empty
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            serde_json::from_str(&text)?
        } else {
            log::debug!("No saved state at {}, starting fresh", path.display());
            HashMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

/// Everything the viewer restores at startup
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedState {
    pub quaternion: Quaternion,
    pub zoom: f64,
    pub star_factor: f64,
    pub ui: UiFlags,
    /// Scheme name, `None` to use the configured default
    pub color_scheme: Option<String>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            quaternion: Quaternion::identity(),
            zoom: 1.0,
            star_factor: 1.0,
            ui: UiFlags::default(),
            color_scheme: None,
        }
    }
}

impl PersistedState {
    /// Read the state, substituting defaults for anything unusable
    pub fn load(store: &dyn StateStore) -> Self {
        Self {
            quaternion: Quaternion::from_persisted(store.get(QUATERNION_KEY).as_deref()),
            zoom: positive_number(store, ZOOM_KEY).unwrap_or(1.0),
            star_factor: positive_number(store, STAR_FACTOR_KEY).unwrap_or(1.0),
            ui: store
                .get(UI_KEY)
                .map(|value| UiFlags::from_persisted(&value))
                .unwrap_or_default(),
            color_scheme: store.get(COLOR_SCHEME_KEY).filter(|name| !name.is_empty()),
        }
    }

    /// Write the whole state
    pub fn save(&self, store: &mut dyn StateStore) -> Result<()> {
        store.set(QUATERNION_KEY, &self.quaternion.to_string())?;
        store.set(ZOOM_KEY, &self.zoom.to_string())?;
        store.set(STAR_FACTOR_KEY, &self.star_factor.to_string())?;
        store.set(UI_KEY, &self.ui.to_persisted())?;
        if let Some(name) = &self.color_scheme {
            store.set(COLOR_SCHEME_KEY, name)?;
        }
        Ok(())
    }
}

/// A finite, non-zero number, as a zero or unparsable value means "unset"
fn positive_number(store: &dyn StateStore, key: &str) -> Option<f64> {
    let value = store.get(key)?;
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() && number > 0.0 => Some(number),
        _ => {
            log::warn!("Ignoring persisted {} {:?}", key, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::UiToggle;
    use rstest::rstest;

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        assert_eq!(PersistedState::load(&store), PersistedState::default());
    }

    #[rstest]
    #[case("2.5", 2.5)]
    #[case("0", 1.0)]
    #[case("-3", 1.0)]
    #[case("zoomed", 1.0)]
    #[case("NaN", 1.0)]
    fn test_zoom_fallback(#[case] stored: &str, #[case] expected: f64) {
        let mut store = MemoryStore::new();
        store.set(ZOOM_KEY, stored).unwrap();
        assert_eq!(PersistedState::load(&store).zoom, expected);
    }

    #[test]
    fn test_malformed_quaternion_falls_back_to_identity() {
        let mut store = MemoryStore::new();
        store.set(QUATERNION_KEY, "1,2,three,4").unwrap();
        store.set(STAR_FACTOR_KEY, "0.5").unwrap();
        let state = PersistedState::load(&store);
        assert_eq!(state.quaternion, Quaternion::identity());
        assert_eq!(state.star_factor, 0.5);
    }

    #[test]
    fn test_round_trip_through_memory() {
        let mut ui = UiFlags::default();
        ui.toggle(UiToggle::Movie);
        let state = PersistedState {
            quaternion: Quaternion::new(0.0, 0.0, 1.0, 0.0),
            zoom: 3.0,
            star_factor: 0.25,
            ui,
            color_scheme: Some("dark".to_string()),
        };
        let mut store = MemoryStore::new();
        state.save(&mut store).unwrap();
        assert_eq!(PersistedState::load(&store), state);
    }

    #[test]
    fn test_json_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(store.get(ZOOM_KEY).is_none());
        store.set(ZOOM_KEY, "4").unwrap();
        store.set(COLOR_SCHEME_KEY, "bright").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get(ZOOM_KEY).as_deref(), Some("4"));
        assert_eq!(reopened.get(COLOR_SCHEME_KEY).as_deref(), Some("bright"));
    }

    #[test]
    fn test_json_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(crate::SkyViewError::JsonError(_))
        ));
    }
}
