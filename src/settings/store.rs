//! In-memory settings store with change notifications

use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
    sync::Mutex,
};
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::error::ConfigError;

/// Flat settings map, keyed by dotted setting names
pub type Settings = BTreeMap<String, Value>;

/// Capacity of the change notification channel
pub const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// User settings with command-line overrides layered on top
#[derive(Debug, Default)]
struct Layers {
    settings: Settings,
    overrides: Settings,
}

impl Layers {
    fn effective(&self, key: &str) -> Option<&Value> {
        self.overrides.get(key).or_else(|| self.settings.get(key))
    }
}

/// Holds the current settings and broadcasts the key of every changed value.
///
/// Overrides win over settings and survive `apply`, so reloading the
/// settings file never clobbers a value given on the command line.
#[derive(Debug)]
pub struct ConfigStore {
    layers: Mutex<Layers>,
    change_tx: broadcast::Sender<String>,
}

impl ConfigStore {
    /// Create an empty store
    pub fn new() -> Self {
        let (change_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            layers: Mutex::new(Layers::default()),
            change_tx,
        }
    }

    /// Create a store pre-filled with `settings`, without emitting events
    pub fn with_settings(settings: Settings) -> Self {
        let store = Self::new();
        store.lock().settings = settings;
        store
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.change_tx.subscribe()
    }

    /// Read an integer setting, returning `default` when it is missing
    pub fn get_int(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        match self.lock().effective(key) {
            None | Some(Value::Null) => Ok(default),
            Some(value) => value.as_i64().ok_or_else(|| ConfigError::NotAnInteger {
                key: key.to_string(),
                value: value.clone(),
            }),
        }
    }

    /// Get a copy of the effective value of a setting
    pub fn get(&self, key: &str) -> Option<Value> {
        self.lock().effective(key).cloned()
    }

    /// Set a value, notifying subscribers when the effective value changed
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        if self.update(key, |layers| {
            layers.settings.insert(key.to_string(), value.clone());
        }) {
            debug!("Setting '{}' changed to {}", key, value);
        }
    }

    /// Pin a value above the settings layer
    pub fn set_override(&self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        if self.update(key, |layers| {
            layers.overrides.insert(key.to_string(), value.clone());
        }) {
            info!("Setting '{}' overridden with {}", key, value);
        }
    }

    /// Remove a value, notifying subscribers when the effective value changed
    pub fn remove(&self, key: &str) {
        if self.update(key, |layers| {
            layers.settings.remove(key);
        }) {
            debug!("Setting '{}' removed", key);
        }
    }

    /// Replace the settings layer, notifying once per key whose effective
    /// value was added, changed or removed. Returns the changed keys.
    pub fn apply(&self, settings: Settings) -> Vec<String> {
        let changed: Vec<String> = {
            let mut layers = self.lock();
            let keys: BTreeSet<String> = layers
                .settings
                .keys()
                .chain(settings.keys())
                .cloned()
                .collect();
            let before: Vec<(String, Option<Value>)> = keys
                .into_iter()
                .map(|key| {
                    let value = layers.effective(&key).cloned();
                    (key, value)
                })
                .collect();

            layers.settings = settings;
            let changed = before
                .into_iter()
                .filter(|(key, value)| layers.effective(key) != value.as_ref())
                .map(|(key, _)| key)
                .collect();
            changed
        };

        if !changed.is_empty() {
            info!("Settings changed: {:?}", changed);
        }
        for key in &changed {
            self.notify(key);
        }
        changed
    }

    /// Load a settings file and apply it
    pub fn load_file(&self, path: &Path) -> Result<Vec<String>, ConfigError> {
        let settings = read_settings_file(path)?;
        Ok(self.apply(settings))
    }

    /// Run `edit` and notify if the effective value of `key` changed
    fn update<F>(&self, key: &str, edit: F) -> bool
    where
        F: FnOnce(&mut Layers),
    {
        let changed = {
            let mut layers = self.lock();
            let before = layers.effective(key).cloned();
            edit(&mut *layers);
            let changed = layers.effective(key) != before.as_ref();
            changed
        };

        if changed {
            self.notify(key);
        }
        changed
    }

    fn notify(&self, key: &str) {
        // Having no subscribers is fine
        if let Err(e) = self.change_tx.send(key.to_string()) {
            debug!("No listeners for setting change: {}", e.0);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Layers> {
        self.layers.lock().unwrap_or_else(|poisoned| {
            warn!("Settings lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a settings document; it must be a JSON object
pub fn parse_settings(text: &str) -> Result<Settings, ConfigError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(ConfigError::NotAnObject),
    }
}

/// Read and parse a settings file
pub fn read_settings_file(path: &Path) -> Result<Settings, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&text)
}
