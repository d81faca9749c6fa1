//! Nullable admin oracle: grant and revoke admin rights at will.

use std::collections::BTreeSet;
use std::sync::Mutex;

use vaultgov_governance::AdminOracle;
use vaultgov_types::Address;

/// An admin oracle backed by an in-memory set.
#[derive(Default)]
pub struct NullAdminOracle {
    admins: Mutex<BTreeSet<Address>>,
}

impl NullAdminOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admins(admins: impl IntoIterator<Item = Address>) -> Self {
        Self {
            admins: Mutex::new(admins.into_iter().collect()),
        }
    }

    pub fn grant(&self, actor: Address) {
        self.admins.lock().unwrap().insert(actor);
    }

    pub fn revoke(&self, actor: &Address) {
        self.admins.lock().unwrap().remove(actor);
    }
}

impl AdminOracle for NullAdminOracle {
    fn is_admin(&self, actor: &Address) -> bool {
        self.admins.lock().unwrap().contains(actor)
    }
}
