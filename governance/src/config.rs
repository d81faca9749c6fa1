//! Governance configuration with TOML file support.

use serde::{Deserialize, Serialize};
use vaultgov_types::Address;

use crate::protocol::MAX_GOVERNANCE_DELAY;
use crate::GovernanceError;

/// Configuration of the shared protocol governance.
///
/// Can be loaded from a TOML file via [`GovernanceConfig::from_toml_file`]
/// or built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Seconds between staging and the earliest commit, minus one.
    #[serde(default = "default_governance_delay")]
    pub governance_delay_secs: u64,

    /// Protocol admins allowed to stage and commit.
    #[serde(default)]
    pub admins: Vec<Address>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_governance_delay() -> u64 {
    24 * 60 * 60
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl GovernanceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, GovernanceError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GovernanceError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, GovernanceError> {
        toml::from_str(s).map_err(|e| GovernanceError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, GovernanceError> {
        toml::to_string_pretty(self).map_err(|e| GovernanceError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), GovernanceError> {
        if self.governance_delay_secs > MAX_GOVERNANCE_DELAY {
            return Err(GovernanceError::Config(format!(
                "governance_delay_secs {} exceeds maximum {MAX_GOVERNANCE_DELAY}",
                self.governance_delay_secs
            )));
        }
        if self.admins.is_empty() {
            return Err(GovernanceError::Config("at least one admin is required".to_string()));
        }
        if !matches!(self.log_format.as_str(), "human" | "json") {
            return Err(GovernanceError::Config(format!(
                "unknown log_format {:?}",
                self.log_format
            )));
        }
        Ok(())
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            governance_delay_secs: default_governance_delay(),
            admins: Vec::new(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
