//! The protocol-wide governance singleton.
//!
//! Holds the governance delay and the admin set every governance instance
//! consults. It is shared by reference (`Arc`) and read-only from the point
//! of view of the timelock; changing the delay or the admins is outside this
//! crate.

use std::collections::BTreeSet;

use vaultgov_types::Address;

use crate::access::AdminOracle;
use crate::config::GovernanceConfig;
use crate::delay::DelayPolicy;
use crate::error::GovernanceError;
use crate::kind::ParameterKind;

/// Upper bound on the governance delay (7 days).
pub const MAX_GOVERNANCE_DELAY: u64 = 7 * 24 * 60 * 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolGovernance {
    governance_delay: u64,
    admins: BTreeSet<Address>,
}

impl ProtocolGovernance {
    pub fn new(
        governance_delay: u64,
        admins: impl IntoIterator<Item = Address>,
    ) -> Result<Self, GovernanceError> {
        if governance_delay > MAX_GOVERNANCE_DELAY {
            return Err(GovernanceError::Config(format!(
                "governance delay {governance_delay}s exceeds maximum {MAX_GOVERNANCE_DELAY}s"
            )));
        }
        Ok(Self {
            governance_delay,
            admins: admins.into_iter().collect(),
        })
    }

    pub fn from_config(config: &GovernanceConfig) -> Result<Self, GovernanceError> {
        config.validate()?;
        Self::new(config.governance_delay_secs, config.admins.iter().copied())
    }

    pub fn governance_delay(&self) -> u64 {
        self.governance_delay
    }

    pub fn admins(&self) -> impl Iterator<Item = &Address> {
        self.admins.iter()
    }
}

impl AdminOracle for ProtocolGovernance {
    fn is_admin(&self, actor: &Address) -> bool {
        self.admins.contains(actor)
    }
}

impl DelayPolicy for ProtocolGovernance {
    fn required_delay(&self, _kind: ParameterKind) -> u64 {
        self.governance_delay
    }
}
