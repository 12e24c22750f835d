//! # Shared Types Crate
//!
//! Cross-subsystem domain types for the on-chain economic core.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type two or more subsystems exchange
//!   (object ids, share amounts, chain context objects, chain parameters)
//!   is defined here and nowhere else.
//! - **Ids, Not References**: subsystems pass typed object ids across call
//!   boundaries and re-resolve through the database; no raw references to
//!   stored objects survive a mutation.
//! - **Consensus Constants Live Here**: hardfork activation timestamps are
//!   chain configuration, not subsystem configuration.

pub mod entities;
pub mod hardfork;

pub use entities::*;
pub use hardfork::{autorenewal_active, renewal_by_operation_active};
