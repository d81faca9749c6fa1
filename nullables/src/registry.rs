//! Nullable vault registry: register vaults at will.

use std::collections::BTreeSet;
use std::sync::Mutex;

use vaultgov_governance::VaultRegistry;
use vaultgov_types::VaultNft;

#[derive(Default)]
pub struct NullVaultRegistry {
    vaults: Mutex<BTreeSet<VaultNft>>,
}

impl NullVaultRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vaults(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            vaults: Mutex::new(ids.into_iter().map(VaultNft::new).collect()),
        }
    }

    pub fn register(&self, nft: VaultNft) {
        self.vaults.lock().unwrap().insert(nft);
    }
}

impl VaultRegistry for NullVaultRegistry {
    fn contains(&self, nft: VaultNft) -> bool {
        self.vaults.lock().unwrap().contains(&nft)
    }
}
