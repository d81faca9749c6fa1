//! Admin gating for mutating governance operations.

use std::sync::Arc;

use vaultgov_types::Address;

use crate::error::GovernanceError;

/// Answers whether an actor holds the protocol admin role.
///
/// The protocol governance is the production implementation; tests
/// substitute a double that grants or denies arbitrary actors.
pub trait AdminOracle: Send + Sync {
    fn is_admin(&self, actor: &Address) -> bool;
}

/// The admin gate of one governance instance.
///
/// Every instance delegates to the single protocol-wide admin set; there is
/// no per-instance override.
#[derive(Clone)]
pub struct AccessControl {
    oracle: Arc<dyn AdminOracle>,
}

impl AccessControl {
    pub fn new(oracle: Arc<dyn AdminOracle>) -> Self {
        Self { oracle }
    }

    /// Whether `actor` may stage and commit on `instance`.
    pub fn is_admin(&self, actor: &Address, instance: &Address) -> bool {
        let allowed = self.oracle.is_admin(actor);
        tracing::trace!(%actor, %instance, allowed, "admin lookup");
        allowed
    }

    pub fn require_admin(
        &self,
        actor: &Address,
        instance: &Address,
    ) -> Result<(), GovernanceError> {
        if self.is_admin(actor, instance) {
            Ok(())
        } else {
            tracing::debug!(%actor, %instance, "rejected: not an admin");
            Err(GovernanceError::NotAdmin { actor: *actor })
        }
    }
}
