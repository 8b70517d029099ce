//! Provider settings collaborator.
//!
//! Providers never cache settings: every [`crate::ResultsProvider::search`]
//! call reads its options fresh through [`Settings`], falling back to the
//! provider's own defaults when an option is unset.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

/// A single option value as stored by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl SettingValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Str(_) => "string",
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Read access to named provider options.
///
/// Implementations must be `Send + Sync`; the aggregator may run several
/// providers against the same store concurrently.
pub trait Settings: Send + Sync {
    /// Look up a raw option value, `None` when unset.
    fn lookup(&self, option: &str) -> Option<SettingValue>;

    /// Returns the option value, or `default` when unset.
    fn get(&self, option: &str, default: SettingValue) -> SettingValue {
        self.lookup(option).unwrap_or(default)
    }

    /// Typed boolean read.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] if the option is set to a
    /// non-boolean value.
    fn get_bool(&self, option: &str, default: bool) -> Result<bool> {
        match self.get(option, SettingValue::Bool(default)) {
            SettingValue::Bool(value) => Ok(value),
            other => Err(mismatch(option, "bool", &other)),
        }
    }

    /// Typed string read.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] if the option is set to a
    /// non-string value.
    fn get_string(&self, option: &str, default: &str) -> Result<String> {
        match self.get(option, SettingValue::from(default)) {
            SettingValue::Str(value) => Ok(value),
            other => Err(mismatch(option, "string", &other)),
        }
    }
}

fn mismatch(option: &str, expected: &str, found: &SettingValue) -> ProviderError {
    ProviderError::Config(format!(
        "option `{option}` must be a {expected}, found {}",
        found.type_name()
    ))
}

/// In-memory settings store.
///
/// Values can be changed between searches with [`MemorySettings::set`];
/// providers observe the change on their next invocation.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<String, SettingValue>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`MemorySettings::set`].
    pub fn with(self, option: &str, value: impl Into<SettingValue>) -> Self {
        self.set(option, value);
        self
    }

    pub fn set(&self, option: &str, value: impl Into<SettingValue>) {
        self.write().insert(option.to_string(), value.into());
    }

    pub fn remove(&self, option: &str) {
        self.write().remove(option);
    }

    // Recovers from poisoning: every update is a single map operation.
    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, SettingValue>> {
        self.values.write().unwrap_or_else(|poisoned| {
            tracing::warn!("settings lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, SettingValue>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FromIterator<(String, SettingValue)> for MemorySettings {
    fn from_iter<I: IntoIterator<Item = (String, SettingValue)>>(iter: I) -> Self {
        Self {
            values: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl Settings for MemorySettings {
    fn lookup(&self, option: &str) -> Option<SettingValue> {
        self.read().get(option).cloned()
    }
}
