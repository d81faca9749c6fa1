//! Nullable infrastructure for deterministic testing.
//!
//! Every collaborator a governance instance consults (clock, admin oracle,
//! vault registry) is a trait. This crate provides implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never read the system clock
//!
//! Usage: swap real implementations for nullables in tests and simulations.

pub mod admin;
pub mod clock;
pub mod events;
pub mod registry;

pub use admin::NullAdminOracle;
pub use clock::NullClock;
pub use events::EventRecorder;
pub use registry::NullVaultRegistry;
