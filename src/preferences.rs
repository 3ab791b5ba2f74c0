use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::error::Result;

/// Name of the single persisted preference
pub const WORD_COUNT_KEY: &str = "wordCount";

/// Word count used when nothing usable is stored
pub const DEFAULT_WORD_COUNT: usize = 50;

/// Counts offered by the options bar
pub const WORD_COUNT_OPTIONS: [usize; 3] = [10, 25, 50];

/// Key-value slot holding string-encoded preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Interpret a stored word count. Absent or non-numeric values fall back to
/// the default; numeric values are clamped to at least one word.
pub fn parse_word_count(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_WORD_COUNT;
    };

    match raw.trim().parse::<i64>() {
        Ok(n) if n < 1 => 1,
        Ok(n) => usize::try_from(n).unwrap_or(DEFAULT_WORD_COUNT),
        Err(_) => {
            warn!(value = raw, "ignoring malformed word count preference");
            DEFAULT_WORD_COUNT
        }
    }
}

pub fn load_word_count<S: PreferenceStore + ?Sized>(store: &S) -> usize {
    parse_word_count(store.get(WORD_COUNT_KEY).as_deref())
}

/// Persist `count` (clamped to at least one) and return what was stored
pub fn save_word_count<S: PreferenceStore + ?Sized>(store: &mut S, count: usize) -> Result<usize> {
    let count = count.max(1);
    store.set(WORD_COUNT_KEY, &count.to_string())?;
    Ok(count)
}

/// Step through [`WORD_COUNT_OPTIONS`], wrapping at either end. A count that
/// is not one of the options moves to the nearest option in that direction.
pub fn cycle_word_count(current: usize, forward: bool) -> usize {
    let options = WORD_COUNT_OPTIONS;
    if forward {
        options
            .iter()
            .copied()
            .find(|&n| n > current)
            .unwrap_or(options[0])
    } else {
        options
            .iter()
            .rev()
            .copied()
            .find(|&n| n < current)
            .unwrap_or(options[options.len() - 1])
    }
}

/// Preferences kept as a JSON object on disk
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::preferences_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The whole JSON object. Values of any type are kept so that keys
    /// written by others survive a `set`.
    fn read_all(&self) -> Map<String, Value> {
        let Ok(bytes) = fs::read(&self.path) else {
            return Map::new();
        };

        match serde_json::from_slice(&bytes) {
            Ok(values) => values,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable preferences, starting fresh");
                Map::new()
            }
        }
    }
}

impl Default for FilePreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_all().remove(key)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            other => {
                warn!(key, value = %other, "ignoring non-scalar preference");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all();
        values.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&values)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Store that forgets everything when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
