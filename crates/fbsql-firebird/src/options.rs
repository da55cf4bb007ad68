//! Backend options.
//!
//! Capability flags default to what the configured server version supports;
//! each can be forced on or off.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How generated primary keys are produced and read back on servers that
/// cannot return them from the INSERT itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyGeneration {
    /// A BEFORE INSERT trigger assigns the key from the table's sequence;
    /// the id is read back with a non-incrementing `GEN_ID(<seq>, 0)`.
    #[default]
    Trigger,
    /// A key is fetched before each row's INSERT and bound explicitly,
    /// falling back to `MAX(pk) + 1` when the sequence cannot be read. Rows
    /// are then inserted one statement each, with or without a returned id.
    Preassign,
}

/// Options for the Firebird dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirebirdOptions {
    /// Server version as `(major, minor)`.
    pub server_version: (u8, u8),
    /// Row count used for the `FIRST` paired with a bare `SKIP`.
    pub no_limit_value: Option<u64>,
    /// Forces multi-row INSERT support on or off.
    pub has_bulk_insert: Option<bool>,
    /// Forces `INSERT ... RETURNING` support on or off.
    pub can_return_id_from_insert: Option<bool>,
    /// Key generation strategy for servers without `RETURNING`.
    pub key_generation: KeyGeneration,
}

impl Default for FirebirdOptions {
    fn default() -> Self {
        Self {
            server_version: (2, 5),
            no_limit_value: None,
            has_bulk_insert: None,
            can_return_id_from_insert: None,
            key_generation: KeyGeneration::Trigger,
        }
    }
}

impl FirebirdOptions {
    /// Parses options from JSON. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Options for a specific server version.
    #[must_use]
    pub fn for_version(major: u8, minor: u8) -> Self {
        Self {
            server_version: (major, minor),
            ..Self::default()
        }
    }

    /// Sets the key generation strategy.
    #[must_use]
    pub const fn key_generation(mut self, strategy: KeyGeneration) -> Self {
        self.key_generation = strategy;
        self
    }
}
