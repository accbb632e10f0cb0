use crate::hash::Hasher;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A value held by the settings store.
#[derive(Debug, Clone)]
pub enum SettingValue {
    Str(String),
    I64(i64),
    F64(f64),
    Bool(bool),
    /// The password-hashing entry point.
    Hasher(Arc<Hasher>),
}

/// The process-wide configuration store.
///
/// Keys are case-insensitive; reading a key that was never set is an error
/// rather than a silent default. Consulted for the active storage dialect
/// and the password-hashing entry point.
#[derive(Debug, Default)]
pub struct Settings {
    values: HashMap<String, SettingValue>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) {
        self.values.insert(key.to_lowercase(), value.into());
    }

    pub fn get(&self, key: &str) -> Result<&SettingValue> {
        self.values
            .get(&key.to_lowercase())
            .ok_or_else(|| Error::no_setting(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(&key.to_lowercase())
    }

    /// Reads a string setting.
    pub fn str(&self, key: &str) -> Result<&str> {
        match self.get(key)? {
            SettingValue::Str(value) => Ok(value),
            other => Err(Error::configuration(format!(
                "setting `{key}` is not a string (found {other:?})"
            ))),
        }
    }

    /// Reads the hashing entry point stored under `key`.
    pub fn hasher(&self, key: &str) -> Result<Arc<Hasher>> {
        match self.get(key)? {
            SettingValue::Hasher(hasher) => Ok(hasher.clone()),
            other => Err(Error::configuration(format!(
                "setting `{key}` is not a hasher (found {other:?})"
            ))),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Overlays settings from process environment variables carrying the
    /// given prefix: `GRIDDLE_DATABASE_DIALECT=sqlite` becomes
    /// `database_dialect`.
    pub fn load_env(&mut self, prefix: &str) {
        for (key, value) in std::env::vars() {
            if let Some(stripped) = key.strip_prefix(prefix) {
                let name = stripped.trim_start_matches('_');
                if !name.is_empty() {
                    self.set(name, value);
                }
            }
        }
    }
}

static SETTINGS: OnceLock<RwLock<Settings>> = OnceLock::new();

/// The process-wide settings store.
pub fn settings() -> &'static RwLock<Settings> {
    SETTINGS.get_or_init(|| RwLock::new(Settings::new()))
}

/// Read access to the process-wide store. Lock poisoning is ignored; the
/// store holds plain values.
pub fn read_settings() -> RwLockReadGuard<'static, Settings> {
    settings().read().unwrap_or_else(|e| e.into_inner())
}

/// Write access to the process-wide store.
pub fn write_settings() -> RwLockWriteGuard<'static, Settings> {
    settings().write().unwrap_or_else(|e| e.into_inner())
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Str(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Str(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::I64(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::F64(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<Hasher> for SettingValue {
    fn from(value: Hasher) -> Self {
        SettingValue::Hasher(Arc::new(value))
    }
}

impl From<Arc<Hasher>> for SettingValue {
    fn from(value: Arc<Hasher>) -> Self {
        SettingValue::Hasher(value)
    }
}
