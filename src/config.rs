// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration and runtime flags.
//!
//! The engine never looks anything up on its own. Whoever embeds it builds an
//! [`EngineConfig`] (or parses one from JSON) and pushes [`Flags`] in through
//! `set_flags` whenever they change.
//!
//! ```
//! use shingle::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{"indexTimeoutMs": 500, "flags": {"enableFastSearch": true}}"#).unwrap();
//! assert_eq!(config.index_timeout_ms, 500);
//! assert_eq!(config.default_limit, 3);
//! assert!(config.flags.enable_fast_search);
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::scoring::DEFAULT_LIMIT;

/// Build budget when a request does not name one.
pub const DEFAULT_INDEX_TIMEOUT_MS: u64 = 10_000;

/// Progress is reported at least this often during a build.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Feature switches owned by the embedding application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Flags {
    /// Allow the trigram tier when the index is ready
    pub enable_fast_search: bool,
    /// Run legacy alongside fast and log whether they agree
    pub enable_shadow_test: bool,
}

/// Static engine settings; every field has a default.
impl Flags {
    /// Parse a `{ enableFastSearch, enableShadowTest }` object.
    pub fn from_json_value(value: Value) -> Result<Self> {
        from_object(value, "flags")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub index_timeout_ms: u64,
    pub default_limit: usize,
    pub progress_interval: usize,
    pub flags: Flags,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            index_timeout_ms: DEFAULT_INDEX_TIMEOUT_MS,
            default_limit: DEFAULT_LIMIT,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            flags: Flags::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    ///
    /// A zero `defaultLimit` or `progressInterval` is rejected: the first would
    /// make every defaulted search fail, the second has no meaning.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        Self::from_json_value(value)
    }

    /// Same as [`from_json_str`](Self::from_json_str) for an already parsed value.
    pub fn from_json_value(value: Value) -> Result<Self> {
        if let Some(flags) = value.get("flags") {
            if !flags.is_object() {
                return Err(Error::InvalidConfig("flags must be a JSON object".into()));
            }
        }
        let config: Self = from_object(value, "config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 {
            return Err(Error::InvalidConfig(
                "defaultLimit must be at least 1".into(),
            ));
        }
        if self.progress_interval == 0 {
            return Err(Error::InvalidConfig(
                "progressInterval must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Same config with different flags.
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }
}

/// Derived struct visitors also accept sequences; only objects are configs.
fn from_object<T: DeserializeOwned>(value: Value, what: &str) -> Result<T> {
    if !value.is_object() {
        return Err(Error::InvalidConfig(format!("{} must be a JSON object", what)));
    }
    serde_json::from_value(value).map_err(|e| Error::InvalidConfig(e.to_string()))
}
