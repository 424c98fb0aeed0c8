//! Configuration for the automake client.
//!
//! Loaded from a TOML file; every section and field is optional and falls
//! back to its default.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Builder id used by the build daemon for its own system messages.
pub const SYSTEM_BUILDER_ID: &str = "JPS";

/// Message type the daemon sends when it started from a filesystem
/// snapshot that still has unprocessed changes.
pub const UNPROCESSED_FS_CHANGES_MESSAGE_ID: &str = "!unprocessed_fs_changes_detected!";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AutomakeConfig {
    pub logging: LoggingConfig,
    pub bus: BusConfig,
    pub delivery: DeliveryConfig,
    pub stale_snapshot: StaleSnapshotSignal,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info,automake_core=debug"`.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BusConfig {
    /// Capacity of the broadcast channel carrying subscriber events.
    pub capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Bound of the inbound protocol message queue.
    pub queue_capacity: usize,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
        }
    }
}

/// The (builder id, message type) pair that marks a stale filesystem snapshot.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StaleSnapshotSignal {
    pub builder_id: String,
    pub message_type: String,
}

impl StaleSnapshotSignal {
    pub fn matches(&self, builder_id: &str, message_type: &str) -> bool {
        self.builder_id == builder_id && self.message_type == message_type
    }
}

impl Default for StaleSnapshotSignal {
    fn default() -> Self {
        Self {
            builder_id: SYSTEM_BUILDER_ID.to_string(),
            message_type: UNPROCESSED_FS_CHANGES_MESSAGE_ID.to_string(),
        }
    }
}

impl AutomakeConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads the configuration file at `path`.
    ///
    /// A missing file is not an error and yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(
                "[AutomakeConfig] {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("[AutomakeConfig] Loaded {}", path.display());
        Ok(config)
    }
}
