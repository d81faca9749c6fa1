//! Vault identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The registry-assigned identifier of a vault (its NFT id).
///
/// Per-vault parameter slots are keyed by this value. Id `0` is never
/// assigned by the vault registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaultNft(u64);

impl VaultNft {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VaultNft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for VaultNft {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
