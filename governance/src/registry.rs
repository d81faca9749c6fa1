//! Read-only collaborators each governance instance is wired to.

use std::collections::BTreeSet;
use std::sync::Arc;

use vaultgov_types::VaultNft;

use crate::access::AdminOracle;
use crate::delay::DelayPolicy;
use crate::protocol::ProtocolGovernance;

/// Answers whether a vault is registered.
pub trait VaultRegistry: Send + Sync {
    fn contains(&self, nft: VaultNft) -> bool;
}

/// A fixed set of registered vaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VaultSet(BTreeSet<VaultNft>);

impl FromIterator<VaultNft> for VaultSet {
    fn from_iter<I: IntoIterator<Item = VaultNft>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl VaultRegistry for VaultSet {
    fn contains(&self, nft: VaultNft) -> bool {
        self.0.contains(&nft)
    }
}

/// The references a governance instance resolves admins, delays and vaults
/// through. Cloned into every instance at construction.
#[derive(Clone)]
pub struct InternalParams {
    pub admin_oracle: Arc<dyn AdminOracle>,
    pub delay_policy: Arc<dyn DelayPolicy>,
    pub vault_registry: Arc<dyn VaultRegistry>,
}

impl InternalParams {
    /// Wire admins and delay to the shared protocol governance.
    pub fn new(protocol: Arc<ProtocolGovernance>, vault_registry: Arc<dyn VaultRegistry>) -> Self {
        Self {
            admin_oracle: protocol.clone(),
            delay_policy: protocol,
            vault_registry,
        }
    }
}
