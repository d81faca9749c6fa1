//! End-to-end timelock scenarios across governance kinds.

use std::sync::{Arc, Mutex};

use vaultgov_governance::{
    AaveDelayedProtocolParams, AaveVaultGovernance, Clock, GovernanceError, GovernanceEvent,
    GovernanceInstance, InternalParams, LpIssuerDelayedProtocolPerVaultParams,
    LpIssuerDelayedStrategyParams, LpIssuerGovernance, ParameterKind, ProtocolGovernance,
    TraderRegistryDelayedProtocolParams, TraderRegistryGovernance, UniformDelay,
    YearnDelayedProtocolParams, YearnVaultGovernance,
};
use vaultgov_nullables::{EventRecorder, NullAdminOracle, NullClock, NullVaultRegistry};
use vaultgov_types::{Address, Timestamp, VaultNft};

const ADMIN: Address = Address::from_low_u8(0xa1);
const DEPLOYER: Address = Address::from_low_u8(0xd0);
const STRANGER: Address = Address::from_low_u8(0x5e);

struct Harness {
    clock: Arc<NullClock>,
    admins: Arc<NullAdminOracle>,
    vaults: Arc<NullVaultRegistry>,
    delay: u64,
}

impl Harness {
    fn new(delay: u64, start: u64) -> Self {
        Self {
            clock: Arc::new(NullClock::new(start)),
            admins: Arc::new(NullAdminOracle::with_admins([ADMIN])),
            vaults: Arc::new(NullVaultRegistry::with_vaults([1, 2])),
            delay,
        }
    }

    fn internal(&self) -> InternalParams {
        InternalParams {
            admin_oracle: self.admins.clone(),
            delay_policy: Arc::new(UniformDelay(self.delay)),
            vault_registry: self.vaults.clone(),
        }
    }

    fn instance<K: vaultgov_governance::GovernanceKind>(&self, n: u8) -> GovernanceInstance<K> {
        GovernanceInstance::new(Address::from_low_u8(n), self.internal(), self.clock.clone())
    }
}

fn aave(apy: u32) -> AaveDelayedProtocolParams {
    AaveDelayedProtocolParams {
        lending_pool: Address::from_low_u8(0x50),
        estimated_aave_apy: apy,
    }
}

fn strategy(fee: u32) -> LpIssuerDelayedStrategyParams {
    LpIssuerDelayedStrategyParams {
        strategy_treasury: Address::from_low_u8(0x60),
        management_fee: fee,
        performance_fee: fee * 10,
    }
}

#[test]
fn delay_100_boundary_scenario() {
    let h = Harness::new(100, 1000);
    let mut gov: AaveVaultGovernance = h.instance(1);

    let eta = gov.stage_delayed_protocol_params(&ADMIN, aave(1)).unwrap();
    assert_eq!(eta, Timestamp::new(1101));

    h.clock.set(1100);
    assert!(matches!(
        gov.commit_delayed_protocol_params(&ADMIN),
        Err(GovernanceError::DelayNotElapsed { .. })
    ));
    assert_eq!(
        gov.delayed_protocol_params(),
        &AaveDelayedProtocolParams::default()
    );

    h.clock.set(1101);
    gov.commit_delayed_protocol_params(&ADMIN).unwrap();
    assert_eq!(gov.delayed_protocol_params(), &aave(1));
    assert_eq!(
        gov.staged_delayed_protocol_params(),
        AaveDelayedProtocolParams::default()
    );
    assert_eq!(gov.delayed_protocol_params_timestamp(), Timestamp::EPOCH);

    // Exactly once: nothing left to commit.
    assert_eq!(
        gov.commit_delayed_protocol_params(&ADMIN),
        Err(GovernanceError::NothingStaged)
    );
}

#[test]
fn restage_discards_first_value() {
    let h = Harness::new(100, 1000);
    let mut gov: YearnVaultGovernance = h.instance(2);
    let v1 = YearnDelayedProtocolParams {
        yearn_vault_registry: Address::from_low_u8(1),
    };
    let v2 = YearnDelayedProtocolParams {
        yearn_vault_registry: Address::from_low_u8(2),
    };

    gov.stage_delayed_protocol_params(&ADMIN, v1).unwrap();
    h.clock.set(1050);
    gov.stage_delayed_protocol_params(&ADMIN, v2.clone())
        .unwrap();
    assert_eq!(gov.staged_delayed_protocol_params(), v2);
    assert_eq!(
        gov.delayed_protocol_params_timestamp(),
        Timestamp::new(1151)
    );

    // The first stage's eligibility no longer applies.
    h.clock.set(1101);
    assert!(gov.commit_delayed_protocol_params(&ADMIN).is_err());

    h.clock.set(1151);
    assert_eq!(gov.commit_delayed_protocol_params(&ADMIN), Ok(v2));
}

#[test]
fn strategy_commit_waits_for_its_own_eligibility() {
    let h = Harness::new(100, 1000);
    let mut gov: LpIssuerGovernance = h.instance(3);
    let v1 = VaultNft::new(1);

    gov.stage_delayed_strategy_params(&ADMIN, v1, strategy(200))
        .unwrap();
    h.clock.set(1100);
    assert_eq!(
        gov.commit_delayed_strategy_params(&ADMIN, v1),
        Err(GovernanceError::DelayNotElapsed {
            now: Timestamp::new(1100),
            eligible_at: Timestamp::new(1101)
        })
    );
    assert_eq!(
        gov.delayed_strategy_params(v1),
        LpIssuerDelayedStrategyParams::default()
    );
    assert_eq!(gov.staged_delayed_strategy_params(v1), strategy(200));
    assert_eq!(
        gov.delayed_strategy_params_timestamp(v1),
        Timestamp::new(1101)
    );

    // Restaging replaces the value and restarts the wait from 1100.
    gov.stage_delayed_strategy_params(&ADMIN, v1, strategy(300))
        .unwrap();
    assert_eq!(
        gov.delayed_strategy_params_timestamp(v1),
        Timestamp::new(1201)
    );
    h.clock.set(1101);
    assert!(matches!(
        gov.commit_delayed_strategy_params(&ADMIN, v1),
        Err(GovernanceError::DelayNotElapsed { .. })
    ));

    h.clock.set(1201);
    assert_eq!(
        gov.commit_delayed_strategy_params(&ADMIN, v1),
        Ok(strategy(300))
    );
    assert_eq!(gov.delayed_strategy_params(v1), strategy(300));
    assert_eq!(gov.delayed_strategy_params_timestamp(v1), Timestamp::EPOCH);
}

#[test]
fn per_vault_commit_waits_for_its_own_eligibility() {
    let h = Harness::new(100, 1000);
    let mut gov: LpIssuerGovernance = h.instance(3);
    let v2 = VaultNft::new(2);
    let fee = |protocol_fee| LpIssuerDelayedProtocolPerVaultParams { protocol_fee };

    gov.stage_delayed_protocol_per_vault_params(&ADMIN, v2, fee(5))
        .unwrap();
    h.clock.set(1100);
    assert_eq!(
        gov.commit_delayed_protocol_per_vault_params(&ADMIN, v2),
        Err(GovernanceError::DelayNotElapsed {
            now: Timestamp::new(1100),
            eligible_at: Timestamp::new(1101)
        })
    );
    assert_eq!(gov.delayed_protocol_per_vault_params(v2), fee(0));
    assert_eq!(gov.staged_delayed_protocol_per_vault_params(v2), fee(5));
    assert_eq!(
        gov.delayed_protocol_per_vault_params_timestamp(v2),
        Timestamp::new(1101)
    );

    h.clock.set(2150);
    gov.stage_delayed_protocol_per_vault_params(&ADMIN, v2, fee(7))
        .unwrap();
    assert_eq!(
        gov.delayed_protocol_per_vault_params_timestamp(v2),
        Timestamp::new(2251)
    );
    h.clock.set(2250);
    assert!(matches!(
        gov.commit_delayed_protocol_per_vault_params(&ADMIN, v2),
        Err(GovernanceError::DelayNotElapsed { .. })
    ));
    assert_eq!(gov.delayed_protocol_per_vault_params(v2), fee(0));

    h.clock.set(2251);
    assert_eq!(
        gov.commit_delayed_protocol_per_vault_params(&ADMIN, v2),
        Ok(fee(7))
    );
    assert_eq!(gov.delayed_protocol_per_vault_params(v2), fee(7));
}

#[test]
fn deployer_and_strangers_are_never_admins() {
    let h = Harness::new(0, 10);
    let mut gov: LpIssuerGovernance = h.instance(3);
    let vault = VaultNft::new(1);

    for actor in [DEPLOYER, STRANGER] {
        assert_eq!(
            gov.stage_delayed_strategy_params(&actor, vault, strategy(1)),
            Err(GovernanceError::NotAdmin { actor })
        );
        assert_eq!(
            gov.stage_delayed_protocol_per_vault_params(
                &actor,
                vault,
                LpIssuerDelayedProtocolPerVaultParams { protocol_fee: 1 }
            ),
            Err(GovernanceError::NotAdmin { actor })
        );
    }

    gov.stage_delayed_strategy_params(&ADMIN, vault, strategy(1))
        .unwrap();
    h.clock.advance(1_000);
    for actor in [DEPLOYER, STRANGER] {
        assert_eq!(
            gov.commit_delayed_strategy_params(&actor, vault),
            Err(GovernanceError::NotAdmin { actor })
        );
    }
    assert_eq!(gov.staged_delayed_strategy_params(vault), strategy(1));
    assert_eq!(
        gov.delayed_strategy_params(vault),
        LpIssuerDelayedStrategyParams::default()
    );
}

#[test]
fn revoked_admin_loses_access_immediately() {
    let h = Harness::new(0, 10);
    let mut gov: TraderRegistryGovernance = h.instance(4);
    let params = TraderRegistryDelayedProtocolParams {
        max_slippage_bps: 30,
        trader_cooldown: 600,
    };

    gov.stage_delayed_protocol_params(&ADMIN, params).unwrap();
    h.admins.revoke(&ADMIN);
    h.clock.advance(10);
    assert_eq!(
        gov.commit_delayed_protocol_params(&ADMIN),
        Err(GovernanceError::NotAdmin { actor: ADMIN })
    );

    h.admins.grant(STRANGER);
    assert!(gov.commit_delayed_protocol_params(&STRANGER).is_ok());
}

#[test]
fn vault_registered_later_becomes_governable() {
    let h = Harness::new(0, 10);
    let mut gov: LpIssuerGovernance = h.instance(3);
    let vault = VaultNft::new(7);

    assert_eq!(
        gov.stage_delayed_strategy_params(&ADMIN, vault, strategy(5)),
        Err(GovernanceError::VaultNotFound(vault))
    );
    h.vaults.register(vault);
    assert_eq!(
        gov.stage_delayed_strategy_params(&ADMIN, vault, strategy(5)),
        Ok(Timestamp::new(11))
    );
}

#[test]
fn overflow_leaves_state_unchanged() {
    let h = Harness::new(10, u64::MAX - 10);
    let mut gov: AaveVaultGovernance = h.instance(1);
    let recorder = EventRecorder::new();
    gov.subscribe(recorder.listener());

    assert_eq!(
        gov.stage_delayed_protocol_params(&ADMIN, aave(1)),
        Err(GovernanceError::ArithmeticOverflow {
            now: Timestamp::new(u64::MAX - 10),
            delay: 10
        })
    );
    assert_eq!(gov.delayed_protocol_params_timestamp(), Timestamp::EPOCH);
    assert!(recorder.is_empty());
}

#[test]
fn initialize_once_per_instance() {
    let h = Harness::new(0, 0);
    let mut aave_gov: AaveVaultGovernance = h.instance(1);
    let mut lp_gov: LpIssuerGovernance = h.instance(3);
    let factory = Address::from_low_u8(0xfa);

    aave_gov.initialize(factory).unwrap();
    lp_gov.initialize(Address::from_low_u8(0xfb)).unwrap();

    assert_eq!(
        aave_gov.initialize(Address::from_low_u8(0xfc)),
        Err(GovernanceError::AlreadyInitialized { factory })
    );
    assert_eq!(aave_gov.factory(), Some(&factory));
    assert_eq!(lp_gov.factory(), Some(&Address::from_low_u8(0xfb)));
}

#[test]
fn events_carry_instance_kind_vault_and_eta() {
    let h = Harness::new(100, 1000);
    let mut gov: LpIssuerGovernance = h.instance(3);
    let recorder = EventRecorder::new();
    gov.subscribe(recorder.listener());
    let vault = VaultNft::new(2);

    gov.stage_delayed_strategy_params(&ADMIN, vault, strategy(3))
        .unwrap();
    h.clock.set(1101);
    gov.commit_delayed_strategy_params(&ADMIN, vault).unwrap();

    let events = recorder.events();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        GovernanceEvent::Staged {
            instance: Address::from_low_u8(3),
            governance: "LpIssuerGovernance",
            kind: ParameterKind::DelayedStrategyParams,
            vault: Some(vault),
            actor: ADMIN,
            value: serde_json::to_value(strategy(3)).unwrap(),
            eligible_at: Timestamp::new(1101),
        }
    );
    assert_eq!(
        events[1],
        GovernanceEvent::Committed {
            instance: Address::from_low_u8(3),
            governance: "LpIssuerGovernance",
            kind: ParameterKind::DelayedStrategyParams,
            vault: Some(vault),
            actor: ADMIN,
            value: serde_json::to_value(strategy(3)).unwrap(),
        }
    );
}

#[test]
fn instances_share_protocol_governance() {
    let protocol = Arc::new(ProtocolGovernance::new(50, [ADMIN]).unwrap());
    let internal = InternalParams::new(protocol, Arc::new(NullVaultRegistry::with_vaults([1])));
    let clock = Arc::new(NullClock::new(0));

    let mut aave_gov: AaveVaultGovernance =
        GovernanceInstance::new(Address::from_low_u8(1), internal.clone(), clock.clone());
    let mut lp_gov: LpIssuerGovernance =
        GovernanceInstance::new(Address::from_low_u8(3), internal, clock.clone());

    assert_eq!(
        aave_gov.stage_delayed_protocol_params(&ADMIN, aave(1)),
        Ok(Timestamp::new(51))
    );
    assert_eq!(
        lp_gov.stage_delayed_strategy_params(&ADMIN, VaultNft::new(1), strategy(1)),
        Ok(Timestamp::new(51))
    );
    assert!(!aave_gov.is_admin(&STRANGER));
    assert!(lp_gov.is_admin(&ADMIN));
    assert_eq!(clock.now(), Timestamp::new(0));
}

#[test]
fn serialized_access_from_threads() {
    let h = Harness::new(0, 0);
    let gov: Arc<Mutex<AaveVaultGovernance>> = Arc::new(Mutex::new(h.instance(1)));

    let handles: Vec<_> = (0..8u32)
        .map(|apy| {
            let gov = Arc::clone(&gov);
            std::thread::spawn(move || {
                gov.lock()
                    .unwrap()
                    .stage_delayed_protocol_params(&ADMIN, aave(apy))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Whichever stage ran last is the only pending value.
    h.clock.advance(1);
    let committed = gov
        .lock()
        .unwrap()
        .commit_delayed_protocol_params(&ADMIN)
        .unwrap();
    assert!(committed.estimated_aave_apy < 8);
    assert_eq!(
        gov.lock().unwrap().commit_delayed_protocol_params(&ADMIN),
        Err(GovernanceError::NothingStaged)
    );
}
