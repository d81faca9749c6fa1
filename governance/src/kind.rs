//! Parameter kinds and the per-governance typing of their values.
//!
//! Every governance contract manages up to three delayed parameter kinds.
//! A [`GovernanceKind`] fixes the value type of each of them; the marker
//! traits decide which operations a given governance exposes, so staging
//! strategy params on a governance without strategy params does not compile.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named category of delayed configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    /// Protocol-wide params of one governance, set by protocol admins.
    DelayedProtocolParams,
    /// Strategy params, one slot per vault.
    DelayedStrategyParams,
    /// Protocol params that differ per vault, one slot per vault.
    DelayedProtocolPerVaultParams,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 3] = [
        Self::DelayedProtocolParams,
        Self::DelayedStrategyParams,
        Self::DelayedProtocolPerVaultParams,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DelayedProtocolParams => "delayed_protocol_params",
            Self::DelayedStrategyParams => "delayed_strategy_params",
            Self::DelayedProtocolPerVaultParams => "delayed_protocol_per_vault_params",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bounds every parameter value satisfies.
///
/// `Default` is the zero value: what a fresh slot holds as committed, and
/// what the staged getters return when nothing is pending.
pub trait ParamValue:
    Clone + Default + PartialEq + fmt::Debug + Serialize + Send + Sync + 'static
{
}

impl<T> ParamValue for T where
    T: Clone + Default + PartialEq + fmt::Debug + Serialize + Send + Sync + 'static
{
}

/// Value type for a parameter kind a governance does not manage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoParams;

/// A governance contract type and the value types of its parameter kinds.
pub trait GovernanceKind: Send + Sync + 'static {
    /// Contract name used in events and logs.
    const NAME: &'static str;

    type DelayedProtocolParams: ParamValue;
    type DelayedStrategyParams: ParamValue;
    type DelayedProtocolPerVaultParams: ParamValue;
}

/// Governances that manage per-vault strategy params.
pub trait StrategyGoverned: GovernanceKind {}

/// Governances that manage per-vault protocol params.
pub trait PerVaultGoverned: GovernanceKind {}

/// Vault governances that are bound once to their vault factory.
pub trait FactoryBearing: GovernanceKind {}
