//! Persisted session state: last directory and recently used custom values.
//!
//! Stored as JSON. Loading never fails the session: a missing file gives
//! defaults, malformed entries are dropped with a warning.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::frame::{Rgb, Size};

/// Maximum entries kept in each recent list.
pub const RECENT_CAPACITY: usize = 10;

const APP_DIR: &str = "framecrop";
const FILE_NAME: &str = "settings.json";

/// Most-recent-first list, deduplicated by value, capped at [`RECENT_CAPACITY`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentList<T> {
    items: Vec<T>,
}

impl<T> Default for RecentList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: PartialEq> RecentList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored order, dropping later duplicates and overflow.
    pub fn from_stored(values: impl IntoIterator<Item = T>) -> Self {
        let mut items: Vec<T> = Vec::new();
        for v in values {
            if items.len() == RECENT_CAPACITY {
                break;
            }
            if !items.contains(&v) {
                items.push(v);
            }
        }
        Self { items }
    }

    /// Put `value` at the front, removing any earlier copy.
    pub fn remember(&mut self, value: T) {
        self.items.retain(|v| *v != value);
        self.items.insert(0, value);
        self.items.truncate(RECENT_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a RecentList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Everything that survives a restart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub last_dir: Option<PathBuf>,
    pub recent_sizes: RecentList<Size>,
    pub recent_colors: RecentList<Rgb>,
}

impl Settings {
    /// Directory for the next open dialog: the last one used, else home.
    pub fn open_dir(&self) -> PathBuf {
        self.last_dir
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_default()
    }
}

/// On-disk shape. Sizes are `"WxH"`, colors `"#RRGGBB"`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_dir: Option<PathBuf>,
    #[serde(default)]
    recent_sizes: Vec<String>,
    #[serde(default)]
    recent_bg_colors: Vec<String>,
}

impl From<&Settings> for StoredSettings {
    fn from(s: &Settings) -> Self {
        Self {
            last_dir: s.last_dir.clone(),
            recent_sizes: s.recent_sizes.iter().map(Size::to_string).collect(),
            recent_bg_colors: s.recent_colors.iter().map(|c| c.to_hex()).collect(),
        }
    }
}

impl From<StoredSettings> for Settings {
    fn from(stored: StoredSettings) -> Self {
        let sizes = stored.recent_sizes.iter().filter_map(|raw| {
            let parsed = Size::parse(raw);
            if parsed.is_none() {
                warn!(entry = %raw, "dropping malformed recent size");
            }
            parsed
        });
        let colors = stored.recent_bg_colors.iter().filter_map(|raw| {
            let parsed = parse_stored_color(raw);
            if parsed.is_none() {
                warn!(entry = %raw, "dropping malformed recent color");
            }
            parsed
        });
        Self {
            last_dir: stored.last_dir,
            recent_sizes: RecentList::from_stored(sizes),
            recent_colors: RecentList::from_stored(colors),
        }
    }
}

/// Stored colors are always written as `#RRGGBB`; anything else is foreign.
fn parse_stored_color(raw: &str) -> Option<Rgb> {
    if raw.len() != 7 || !raw.starts_with('#') {
        return None;
    }
    Rgb::from_hex(raw)
}

/// Where settings are read from and written to.
///
/// `path == None` keeps everything in memory; saves are no-ops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsStore {
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// `<config dir>/framecrop/settings.json`, or in-memory when the platform
    /// has no config directory.
    pub fn default_location() -> Self {
        Self {
            path: dirs::config_dir().map(|d| d.join(APP_DIR).join(FILE_NAME)),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn in_memory() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read settings. A missing file yields defaults.
    pub fn try_load(&self) -> Result<Settings> {
        let Some(path) = &self.path else {
            return Ok(Settings::default());
        };
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file yet");
                return Ok(Settings::default());
            }
            Err(e) => return Err(Error::io(path, e)),
        };
        let stored: StoredSettings =
            serde_json::from_str(&text).map_err(|source| Error::Settings {
                path: path.clone(),
                source,
            })?;
        Ok(stored.into())
    }

    /// Read settings, falling back to defaults on any error.
    pub fn load(&self) -> Settings {
        self.try_load().unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable settings");
            Settings::default()
        })
    }

    /// Replace the stored file with `settings`.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        let json = serde_json::to_string_pretty(&StoredSettings::from(settings)).map_err(
            |source| Error::Settings {
                path: path.clone(),
                source,
            },
        )?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| Error::io(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), "saved settings");
        Ok(())
    }
}
