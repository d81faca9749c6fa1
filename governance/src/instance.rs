//! A governance contract: its parameter slots and the admin-gated,
//! delay-enforced operations on them.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use vaultgov_types::{Address, Timestamp, VaultNft};

use crate::access::AccessControl;
use crate::clock::Clock;
use crate::delay::DelayPolicy;
use crate::error::GovernanceError;
use crate::event::{EventBus, GovernanceEvent};
use crate::kind::{
    FactoryBearing, GovernanceKind, ParamValue, ParameterKind, PerVaultGoverned, StrategyGoverned,
};
use crate::registry::{InternalParams, VaultRegistry};
use crate::slot::{self, ParameterSlot};

/// One governance contract of kind `K`.
///
/// Mutations take `&mut self`, so a single instance is only ever changed by
/// one operation at a time. Share it across threads behind a `Mutex`.
pub struct GovernanceInstance<K: GovernanceKind> {
    address: Address,
    access: AccessControl,
    delay_policy: Arc<dyn DelayPolicy>,
    vault_registry: Arc<dyn VaultRegistry>,
    clock: Arc<dyn Clock>,
    events: EventBus,
    factory: Option<Address>,
    protocol_params: ParameterSlot<K::DelayedProtocolParams>,
    strategy_params: BTreeMap<VaultNft, ParameterSlot<K::DelayedStrategyParams>>,
    protocol_per_vault_params: BTreeMap<VaultNft, ParameterSlot<K::DelayedProtocolPerVaultParams>>,
    _kind: PhantomData<K>,
}

impl<K: GovernanceKind> GovernanceInstance<K> {
    pub fn new(address: Address, internal: InternalParams, clock: Arc<dyn Clock>) -> Self {
        tracing::debug!(governance = K::NAME, instance = %address, "governance created");
        Self {
            address,
            access: AccessControl::new(internal.admin_oracle),
            delay_policy: internal.delay_policy,
            vault_registry: internal.vault_registry,
            clock,
            events: EventBus::new(),
            factory: None,
            protocol_params: ParameterSlot::new(),
            strategy_params: BTreeMap::new(),
            protocol_per_vault_params: BTreeMap::new(),
            _kind: PhantomData,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn name(&self) -> &'static str {
        K::NAME
    }

    pub fn is_admin(&self, actor: &Address) -> bool {
        self.access.is_admin(actor, &self.address)
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&GovernanceEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Delayed protocol params ───────────────────────────────────────

    /// Stage new protocol params. Returns the earliest commit time.
    pub fn stage_delayed_protocol_params(
        &mut self,
        actor: &Address,
        params: K::DelayedProtocolParams,
    ) -> Result<Timestamp, GovernanceError> {
        self.stage_with(
            ParameterKind::DelayedProtocolParams,
            None,
            actor,
            params,
            |gov| &mut gov.protocol_params,
        )
    }

    /// Commit staged protocol params. Returns the newly effective value.
    pub fn commit_delayed_protocol_params(
        &mut self,
        actor: &Address,
    ) -> Result<K::DelayedProtocolParams, GovernanceError> {
        self.commit_with(
            ParameterKind::DelayedProtocolParams,
            None,
            actor,
            |gov| Some(&mut gov.protocol_params),
        )
    }

    pub fn delayed_protocol_params(&self) -> &K::DelayedProtocolParams {
        self.protocol_params.committed()
    }

    pub fn staged_delayed_protocol_params(&self) -> K::DelayedProtocolParams {
        self.protocol_params.staged()
    }

    pub fn delayed_protocol_params_timestamp(&self) -> Timestamp {
        self.protocol_params.staged_at()
    }

    // ── Shared stage/commit path ──────────────────────────────────────

    fn require_vault(&self, nft: VaultNft) -> Result<(), GovernanceError> {
        if self.vault_registry.contains(nft) {
            Ok(())
        } else {
            tracing::debug!(
                governance = K::NAME,
                instance = %self.address,
                vault = %nft,
                "rejected: unknown vault"
            );
            Err(GovernanceError::VaultNotFound(nft))
        }
    }

    fn check_caller(
        &self,
        actor: &Address,
        vault: Option<VaultNft>,
    ) -> Result<(), GovernanceError> {
        self.access.require_admin(actor, &self.address)?;
        match vault {
            Some(nft) => self.require_vault(nft),
            None => Ok(()),
        }
    }

    fn stage_with<V, F>(
        &mut self,
        kind: ParameterKind,
        vault: Option<VaultNft>,
        actor: &Address,
        value: V,
        slot_of: F,
    ) -> Result<Timestamp, GovernanceError>
    where
        V: ParamValue,
        F: FnOnce(&mut Self) -> &mut ParameterSlot<V>,
    {
        self.check_caller(actor, vault)?;
        let now = self.clock.now();
        let delay = self.delay_policy.required_delay(kind);
        let json = to_json(&value);

        // Per-vault slots are created on first access: compute the eligibility
        // time before touching the map.
        let eligible_at = match slot::eligible_at(now, delay) {
            Ok(eligible_at) => eligible_at,
            Err(e) => {
                tracing::error!(
                    governance = K::NAME,
                    instance = %self.address,
                    %kind,
                    %now,
                    delay,
                    "eligibility timestamp overflow: {e}"
                );
                return Err(e);
            }
        };
        slot_of(self).stage(value, now, delay)?;

        tracing::info!(
            governance = K::NAME,
            instance = %self.address,
            %kind,
            vault = ?vault,
            %actor,
            %eligible_at,
            "staged"
        );
        self.events.emit(&GovernanceEvent::Staged {
            instance: self.address,
            governance: K::NAME,
            kind,
            vault,
            actor: *actor,
            value: json,
            eligible_at,
        });
        Ok(eligible_at)
    }

    fn commit_with<V, F>(
        &mut self,
        kind: ParameterKind,
        vault: Option<VaultNft>,
        actor: &Address,
        slot_of: F,
    ) -> Result<V, GovernanceError>
    where
        V: ParamValue,
        F: FnOnce(&mut Self) -> Option<&mut ParameterSlot<V>>,
    {
        self.check_caller(actor, vault)?;
        let now = self.clock.now();

        let committed = match slot_of(self) {
            Some(slot) => slot.commit(now).cloned(),
            None => Err(GovernanceError::NothingStaged),
        };
        let value = match committed {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(
                    governance = K::NAME,
                    instance = %self.address,
                    %kind,
                    vault = ?vault,
                    "commit rejected: {e}"
                );
                return Err(e);
            }
        };

        tracing::info!(
            governance = K::NAME,
            instance = %self.address,
            %kind,
            vault = ?vault,
            %actor,
            "committed"
        );
        self.events.emit(&GovernanceEvent::Committed {
            instance: self.address,
            governance: K::NAME,
            kind,
            vault,
            actor: *actor,
            value: to_json(&value),
        });
        Ok(value)
    }
}

// ── Delayed strategy params ────────────────────────────────────────────

impl<K: StrategyGoverned> GovernanceInstance<K> {
    /// Stage strategy params for a registered vault.
    pub fn stage_delayed_strategy_params(
        &mut self,
        actor: &Address,
        nft: VaultNft,
        params: K::DelayedStrategyParams,
    ) -> Result<Timestamp, GovernanceError> {
        self.stage_with(
            ParameterKind::DelayedStrategyParams,
            Some(nft),
            actor,
            params,
            |gov| gov.strategy_params.entry(nft).or_default(),
        )
    }

    pub fn commit_delayed_strategy_params(
        &mut self,
        actor: &Address,
        nft: VaultNft,
    ) -> Result<K::DelayedStrategyParams, GovernanceError> {
        self.commit_with(
            ParameterKind::DelayedStrategyParams,
            Some(nft),
            actor,
            |gov| gov.strategy_params.get_mut(&nft),
        )
    }

    pub fn delayed_strategy_params(&self, nft: VaultNft) -> K::DelayedStrategyParams {
        self.strategy_params
            .get(&nft)
            .map(|slot| slot.committed().clone())
            .unwrap_or_default()
    }

    pub fn staged_delayed_strategy_params(&self, nft: VaultNft) -> K::DelayedStrategyParams {
        self.strategy_params
            .get(&nft)
            .map(ParameterSlot::staged)
            .unwrap_or_default()
    }

    pub fn delayed_strategy_params_timestamp(&self, nft: VaultNft) -> Timestamp {
        self.strategy_params
            .get(&nft)
            .map(ParameterSlot::staged_at)
            .unwrap_or(Timestamp::EPOCH)
    }
}

// ── Delayed protocol per-vault params ──────────────────────────────────

impl<K: PerVaultGoverned> GovernanceInstance<K> {
    /// Stage protocol params for one registered vault.
    pub fn stage_delayed_protocol_per_vault_params(
        &mut self,
        actor: &Address,
        nft: VaultNft,
        params: K::DelayedProtocolPerVaultParams,
    ) -> Result<Timestamp, GovernanceError> {
        self.stage_with(
            ParameterKind::DelayedProtocolPerVaultParams,
            Some(nft),
            actor,
            params,
            |gov| gov.protocol_per_vault_params.entry(nft).or_default(),
        )
    }

    pub fn commit_delayed_protocol_per_vault_params(
        &mut self,
        actor: &Address,
        nft: VaultNft,
    ) -> Result<K::DelayedProtocolPerVaultParams, GovernanceError> {
        self.commit_with(
            ParameterKind::DelayedProtocolPerVaultParams,
            Some(nft),
            actor,
            |gov| gov.protocol_per_vault_params.get_mut(&nft),
        )
    }

    pub fn delayed_protocol_per_vault_params(
        &self,
        nft: VaultNft,
    ) -> K::DelayedProtocolPerVaultParams {
        self.protocol_per_vault_params
            .get(&nft)
            .map(|slot| slot.committed().clone())
            .unwrap_or_default()
    }

    pub fn staged_delayed_protocol_per_vault_params(
        &self,
        nft: VaultNft,
    ) -> K::DelayedProtocolPerVaultParams {
        self.protocol_per_vault_params
            .get(&nft)
            .map(ParameterSlot::staged)
            .unwrap_or_default()
    }

    pub fn delayed_protocol_per_vault_params_timestamp(&self, nft: VaultNft) -> Timestamp {
        self.protocol_per_vault_params
            .get(&nft)
            .map(ParameterSlot::staged_at)
            .unwrap_or(Timestamp::EPOCH)
    }
}

// ── Factory binding ────────────────────────────────────────────────────

impl<K: FactoryBearing> GovernanceInstance<K> {
    /// Bind the governance to its vault factory. Takes effect immediately
    /// and only once.
    pub fn initialize(&mut self, factory: Address) -> Result<(), GovernanceError> {
        if let Some(existing) = self.factory {
            tracing::debug!(
                governance = K::NAME,
                instance = %self.address,
                %existing,
                "rejected: already initialized"
            );
            return Err(GovernanceError::AlreadyInitialized { factory: existing });
        }
        self.factory = Some(factory);
        tracing::info!(governance = K::NAME, instance = %self.address, %factory, "initialized");
        self.events.emit(&GovernanceEvent::Initialized {
            instance: self.address,
            governance: K::NAME,
            factory,
        });
        Ok(())
    }

    pub fn factory(&self) -> Option<&Address> {
        self.factory.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.factory.is_some()
    }
}

fn to_json<V: ParamValue>(value: &V) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::warn!("parameter value is not representable as JSON: {e}");
        serde_json::Value::Null
    })
}
