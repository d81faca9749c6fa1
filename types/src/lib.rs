//! Fundamental types for the vault governance timelock.
//!
//! Shared by every crate in the workspace: actor and contract addresses,
//! vault identifiers, and timestamps.

pub mod address;
pub mod error;
pub mod time;
pub mod vault;

pub use address::Address;
pub use error::TypesError;
pub use time::Timestamp;
pub use vault::VaultNft;
