//! Simulation scripts: a start time, the registered vaults, and timed steps.

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use vaultgov_types::{Address, VaultNft};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    /// Clock value before the first step.
    #[serde(default)]
    pub start: u64,
    /// Vaults known to the vault registry.
    #[serde(default)]
    pub vaults: Vec<VaultNft>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("invalid simulation script")
    }

    pub fn from_toml_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_toml_str(&content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceName {
    Aave,
    Yearn,
    LpIssuer,
    TraderRegistry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Stage,
    Commit,
    Initialize,
}

/// Which slot family a step targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    #[default]
    Protocol,
    Strategy,
    ProtocolPerVault,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// Move the clock here before executing. Omit to keep the current time.
    pub at: Option<u64>,
    pub actor: Option<Address>,
    pub instance: InstanceName,
    pub action: Action,
    #[serde(default)]
    pub target: Target,
    pub vault: Option<VaultNft>,
    /// Parameter value for `stage`, as a table matching the params type.
    pub value: Option<toml::Value>,
    /// Factory address for `initialize`.
    pub factory: Option<Address>,
    /// Error code the step must fail with, e.g. `"delay_not_elapsed"`.
    pub expect_error: Option<String>,
}

impl Step {
    pub fn actor(&self) -> anyhow::Result<Address> {
        self.actor.context("step needs an actor")
    }

    pub fn vault(&self) -> anyhow::Result<VaultNft> {
        self.vault.context("per-vault step needs a vault")
    }

    pub fn factory(&self) -> anyhow::Result<Address> {
        self.factory.context("initialize needs a factory")
    }

    pub fn value<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        self.value
            .clone()
            .context("stage needs a value")?
            .try_into()
            .with_context(|| {
                format!(
                    "value does not match {}",
                    std::any::type_name::<T>()
                        .rsplit("::")
                        .next()
                        .unwrap_or("params")
                )
            })
    }
}
