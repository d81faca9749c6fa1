//! The governance contracts of the protocol and their parameter values.

use serde::{Deserialize, Serialize};
use vaultgov_types::Address;

use crate::instance::GovernanceInstance;
use crate::kind::{FactoryBearing, GovernanceKind, NoParams, PerVaultGoverned, StrategyGoverned};

// ── Aave vault ─────────────────────────────────────────────────────────

/// Governance of Aave lending-pool vaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct AaveVault;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AaveDelayedProtocolParams {
    /// The Aave lending pool vaults deposit into.
    pub lending_pool: Address,
    /// Estimated APY used for tvl estimates, in basis points (500 is 5%).
    /// A plain integer rate, not a Q96 fixed-point ratio.
    pub estimated_aave_apy: u32,
}

impl GovernanceKind for AaveVault {
    const NAME: &'static str = "AaveVaultGovernance";
    type DelayedProtocolParams = AaveDelayedProtocolParams;
    type DelayedStrategyParams = NoParams;
    type DelayedProtocolPerVaultParams = NoParams;
}

impl FactoryBearing for AaveVault {}

pub type AaveVaultGovernance = GovernanceInstance<AaveVault>;

// ── Yearn vault ────────────────────────────────────────────────────────

/// Governance of Yearn vaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct YearnVault;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearnDelayedProtocolParams {
    /// Yearn registry used to resolve yTokens for vault tokens.
    pub yearn_vault_registry: Address,
}

impl GovernanceKind for YearnVault {
    const NAME: &'static str = "YearnVaultGovernance";
    type DelayedProtocolParams = YearnDelayedProtocolParams;
    type DelayedStrategyParams = NoParams;
    type DelayedProtocolPerVaultParams = NoParams;
}

impl FactoryBearing for YearnVault {}

pub type YearnVaultGovernance = GovernanceInstance<YearnVault>;

// ── LP issuer (root vault) ─────────────────────────────────────────────

/// Governance of LP-issuing root vaults. The only kind with all three
/// parameter kinds.
#[derive(Clone, Copy, Debug, Default)]
pub struct LpIssuer;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpIssuerDelayedProtocolParams {
    /// Minimum seconds between two management fee charges.
    pub management_fee_charge_delay: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpIssuerDelayedStrategyParams {
    /// Receiver of strategy fees.
    pub strategy_treasury: Address,
    /// Annualized management fee, in basis points.
    pub management_fee: u32,
    /// Performance fee, in basis points.
    pub performance_fee: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpIssuerDelayedProtocolPerVaultParams {
    /// Annualized protocol fee, in basis points.
    pub protocol_fee: u32,
}

impl GovernanceKind for LpIssuer {
    const NAME: &'static str = "LpIssuerGovernance";
    type DelayedProtocolParams = LpIssuerDelayedProtocolParams;
    type DelayedStrategyParams = LpIssuerDelayedStrategyParams;
    type DelayedProtocolPerVaultParams = LpIssuerDelayedProtocolPerVaultParams;
}

impl StrategyGoverned for LpIssuer {}
impl PerVaultGoverned for LpIssuer {}
impl FactoryBearing for LpIssuer {}

pub type LpIssuerGovernance = GovernanceInstance<LpIssuer>;

// ── Trader registry ────────────────────────────────────────────────────

/// Governance of the trader registry. Not bound to a factory.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraderRegistry;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraderRegistryDelayedProtocolParams {
    /// Maximum slippage a registered trader may route with, in basis points.
    pub max_slippage_bps: u32,
    /// Seconds a newly registered trader waits before it can be used.
    pub trader_cooldown: u64,
}

impl GovernanceKind for TraderRegistry {
    const NAME: &'static str = "TraderRegistryGovernance";
    type DelayedProtocolParams = TraderRegistryDelayedProtocolParams;
    type DelayedStrategyParams = NoParams;
    type DelayedProtocolPerVaultParams = NoParams;
}

pub type TraderRegistryGovernance = GovernanceInstance<TraderRegistry>;
