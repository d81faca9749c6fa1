//! Delayed governance for the vault protocol.
//!
//! Every governance contract changes its configuration in two phases: an
//! admin stages a new value, the protocol-wide governance delay passes, and
//! an admin commits it. The pieces:
//!
//! - [`ParameterSlot`]: the staged/committed cell and its state machine.
//! - [`GovernanceInstance`]: one governance contract, owning its slots and
//!   enforcing admin checks, vault existence and the delay.
//! - [`AdminOracle`], [`DelayPolicy`], [`VaultRegistry`], [`Clock`]: the
//!   injected collaborators, with [`ProtocolGovernance`] as the shared
//!   admin set and delay.
//!
//! No change takes effect before `stage time + delay + 1`.

pub mod access;
pub mod clock;
pub mod config;
pub mod delay;
pub mod error;
pub mod event;
pub mod instance;
pub mod kind;
pub mod params;
pub mod protocol;
pub mod registry;
pub mod slot;

pub use access::{AccessControl, AdminOracle};
pub use clock::{Clock, SystemClock};
pub use config::GovernanceConfig;
pub use delay::{DelayPolicy, UniformDelay};
pub use error::GovernanceError;
pub use event::{EventBus, GovernanceEvent};
pub use instance::GovernanceInstance;
pub use kind::{
    FactoryBearing, GovernanceKind, NoParams, ParamValue, ParameterKind, PerVaultGoverned,
    StrategyGoverned,
};
pub use params::{
    AaveDelayedProtocolParams, AaveVault, AaveVaultGovernance, LpIssuer,
    LpIssuerDelayedProtocolParams, LpIssuerDelayedProtocolPerVaultParams,
    LpIssuerDelayedStrategyParams, LpIssuerGovernance, TraderRegistry,
    TraderRegistryDelayedProtocolParams, TraderRegistryGovernance, YearnDelayedProtocolParams,
    YearnVault, YearnVaultGovernance,
};
pub use protocol::{ProtocolGovernance, MAX_GOVERNANCE_DELAY};
pub use registry::{InternalParams, VaultRegistry, VaultSet};
pub use slot::{ParameterSlot, SlotState, StagedChange};
