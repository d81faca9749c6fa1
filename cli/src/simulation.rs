//! Replays a script against one governance instance of each kind.
//!
//! The instances share a [`ProtocolGovernance`] built from the config and a
//! vault registry holding the script's vaults. Time comes from a
//! [`NullClock`] that each step moves forward.

use std::sync::Arc;

use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde_json::json;
use vaultgov_governance::{
    AaveVaultGovernance, Clock, GovernanceConfig, GovernanceError, GovernanceEvent,
    GovernanceInstance, GovernanceKind, InternalParams, LpIssuerGovernance, ProtocolGovernance,
    TraderRegistryGovernance, VaultSet, YearnVaultGovernance,
};
use vaultgov_nullables::NullClock;
use vaultgov_types::{Address, Timestamp, VaultNft};

use crate::script::{Action, InstanceName, Script, Step, Target};

const AAVE_GOVERNANCE: Address = Address::from_low_u8(0xf1);
const YEARN_GOVERNANCE: Address = Address::from_low_u8(0xf2);
const LP_ISSUER_GOVERNANCE: Address = Address::from_low_u8(0xf3);
const TRADER_REGISTRY_GOVERNANCE: Address = Address::from_low_u8(0xf4);

type StepResult = anyhow::Result<Result<(), GovernanceError>>;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub applied: usize,
    pub expected_rejections: usize,
}

pub struct Simulation {
    clock: Arc<NullClock>,
    vaults: Vec<VaultNft>,
    aave: AaveVaultGovernance,
    yearn: YearnVaultGovernance,
    lp_issuer: LpIssuerGovernance,
    trader_registry: TraderRegistryGovernance,
}

impl Simulation {
    pub fn new(config: &GovernanceConfig, script: &Script) -> Result<Self, GovernanceError> {
        let protocol = Arc::new(ProtocolGovernance::from_config(config)?);
        let vaults: VaultSet = script.vaults.iter().copied().collect();
        let internal = InternalParams::new(protocol, Arc::new(vaults));
        let clock = Arc::new(NullClock::new(script.start));

        Ok(Self {
            aave: GovernanceInstance::new(AAVE_GOVERNANCE, internal.clone(), clock.clone()),
            yearn: GovernanceInstance::new(YEARN_GOVERNANCE, internal.clone(), clock.clone()),
            lp_issuer: GovernanceInstance::new(
                LP_ISSUER_GOVERNANCE,
                internal.clone(),
                clock.clone(),
            ),
            trader_registry: GovernanceInstance::new(
                TRADER_REGISTRY_GOVERNANCE,
                internal,
                clock.clone(),
            ),
            vaults: script.vaults.clone(),
            clock,
        })
    }

    /// Subscribe a fresh listener from `make` on every instance.
    pub fn subscribe_all<F>(&mut self, make: F)
    where
        F: Fn() -> Box<dyn Fn(&GovernanceEvent) + Send + Sync>,
    {
        self.aave.subscribe(make());
        self.yearn.subscribe(make());
        self.lp_issuer.subscribe(make());
        self.trader_registry.subscribe(make());
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Run every step. Fails on the first malformed step or the first
    /// outcome that differs from the step's expectation.
    pub fn run(&mut self, script: &Script) -> anyhow::Result<RunReport> {
        let mut report = RunReport::default();
        for (i, step) in script.steps.iter().enumerate() {
            if let Some(at) = step.at {
                if Timestamp::new(at) < self.now() {
                    tracing::warn!(
                        step = i,
                        at,
                        now = %self.now(),
                        "clock cannot move backwards, keeping current time"
                    );
                }
                self.clock.set(at);
            }

            let outcome = self.execute(step).with_context(|| format!("step {i}"))?;
            match (outcome, step.expect_error.as_deref()) {
                (Ok(()), None) => report.applied += 1,
                (Ok(()), Some(code)) => bail!("step {i}: expected {code}, but it succeeded"),
                (Err(e), Some(code)) if e.code() == code => {
                    tracing::info!(step = i, error = %e, "rejected as expected");
                    report.expected_rejections += 1;
                }
                (Err(e), _) => bail!("step {i}: unexpected rejection ({}): {e}", e.code()),
            }
        }
        Ok(report)
    }

    fn execute(&mut self, step: &Step) -> StepResult {
        let is_stage = match step.action {
            Action::Initialize => return self.initialize(step),
            Action::Stage => true,
            Action::Commit => false,
        };
        match step.instance {
            InstanceName::Aave => protocol_only(&mut self.aave, step, is_stage),
            InstanceName::Yearn => protocol_only(&mut self.yearn, step, is_stage),
            InstanceName::TraderRegistry => {
                protocol_only(&mut self.trader_registry, step, is_stage)
            }
            InstanceName::LpIssuer => self.lp_issuer_step(step, is_stage),
        }
    }

    fn initialize(&mut self, step: &Step) -> StepResult {
        let factory = step.factory()?;
        Ok(match step.instance {
            InstanceName::Aave => self.aave.initialize(factory),
            InstanceName::Yearn => self.yearn.initialize(factory),
            InstanceName::LpIssuer => self.lp_issuer.initialize(factory),
            InstanceName::TraderRegistry => {
                bail!("{} is not bound to a factory", self.trader_registry.name())
            }
        })
    }

    fn lp_issuer_step(&mut self, step: &Step, is_stage: bool) -> StepResult {
        let actor = step.actor()?;
        let gov = &mut self.lp_issuer;
        Ok(match (step.target, is_stage) {
            (Target::Protocol, true) => gov
                .stage_delayed_protocol_params(&actor, step.value()?)
                .map(drop),
            (Target::Protocol, false) => gov.commit_delayed_protocol_params(&actor).map(drop),
            (Target::Strategy, true) => gov
                .stage_delayed_strategy_params(&actor, step.vault()?, step.value()?)
                .map(drop),
            (Target::Strategy, false) => gov
                .commit_delayed_strategy_params(&actor, step.vault()?)
                .map(drop),
            (Target::ProtocolPerVault, true) => gov
                .stage_delayed_protocol_per_vault_params(&actor, step.vault()?, step.value()?)
                .map(drop),
            (Target::ProtocolPerVault, false) => gov
                .commit_delayed_protocol_per_vault_params(&actor, step.vault()?)
                .map(drop),
        })
    }

    /// Committed and pending state of every instance.
    pub fn summary(&self) -> serde_json::Value {
        let lp = &self.lp_issuer;
        let vaults: Vec<_> = self
            .vaults
            .iter()
            .map(|&nft| {
                json!({
                    "vault": nft,
                    "delayed_strategy_params": lp.delayed_strategy_params(nft),
                    "delayed_strategy_params_timestamp": lp.delayed_strategy_params_timestamp(nft),
                    "delayed_protocol_per_vault_params": lp.delayed_protocol_per_vault_params(nft),
                    "delayed_protocol_per_vault_params_timestamp":
                        lp.delayed_protocol_per_vault_params_timestamp(nft),
                })
            })
            .collect();

        json!({
            "now": self.now(),
            "aave": protocol_summary(&self.aave, self.aave.factory()),
            "yearn": protocol_summary(&self.yearn, self.yearn.factory()),
            "lp_issuer": {
                "protocol": protocol_summary(lp, lp.factory()),
                "vaults": vaults,
            },
            "trader_registry": protocol_summary(&self.trader_registry, None),
        })
    }

    pub fn aave(&self) -> &AaveVaultGovernance {
        &self.aave
    }

    pub fn lp_issuer(&self) -> &LpIssuerGovernance {
        &self.lp_issuer
    }
}

fn protocol_only<K>(gov: &mut GovernanceInstance<K>, step: &Step, is_stage: bool) -> StepResult
where
    K: GovernanceKind,
    K::DelayedProtocolParams: DeserializeOwned,
{
    if step.target != Target::Protocol {
        bail!("{} only has delayed protocol params", K::NAME);
    }
    let actor = step.actor()?;
    Ok(if is_stage {
        gov.stage_delayed_protocol_params(&actor, step.value()?)
            .map(drop)
    } else {
        gov.commit_delayed_protocol_params(&actor).map(drop)
    })
}

fn protocol_summary<K: GovernanceKind>(
    gov: &GovernanceInstance<K>,
    factory: Option<&Address>,
) -> serde_json::Value {
    json!({
        "governance": gov.name(),
        "address": gov.address(),
        "factory": factory,
        "delayed_protocol_params": gov.delayed_protocol_params(),
        "staged_delayed_protocol_params": gov.staged_delayed_protocol_params(),
        "delayed_protocol_params_timestamp": gov.delayed_protocol_params_timestamp(),
    })
}
