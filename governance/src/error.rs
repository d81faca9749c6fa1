use thiserror::Error;
use vaultgov_types::{Address, Timestamp, VaultNft};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("{actor} is not a protocol admin")]
    NotAdmin { actor: Address },

    #[error("governance delay not elapsed: now {now}, eligible at {eligible_at}")]
    DelayNotElapsed {
        now: Timestamp,
        eligible_at: Timestamp,
    },

    #[error("nothing staged to commit")]
    NothingStaged,

    #[error("governance already initialized with factory {factory}")]
    AlreadyInitialized { factory: Address },

    #[error("vault {0} not found in the vault registry")]
    VaultNotFound(VaultNft),

    #[error("eligibility timestamp overflows: {now} + {delay}s + 1")]
    ArithmeticOverflow { now: Timestamp, delay: u64 },

    #[error("configuration error: {0}")]
    Config(String),
}

impl GovernanceError {
    /// Stable snake_case identifier of the failure, for scripts and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAdmin { .. } => "not_admin",
            Self::DelayNotElapsed { .. } => "delay_not_elapsed",
            Self::NothingStaged => "nothing_staged",
            Self::AlreadyInitialized { .. } => "already_initialized",
            Self::VaultNotFound(_) => "vault_not_found",
            Self::ArithmeticOverflow { .. } => "arithmetic_overflow",
            Self::Config(_) => "config",
        }
    }
}
