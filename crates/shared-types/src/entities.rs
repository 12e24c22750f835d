//! # Core Domain Entities
//!
//! Cross-subsystem types shared by the cheque and fund subsystems.
//!
//! ## Clusters
//!
//! - **Identity**: typed object ids (`AccountId`, `AssetId`, ...)
//! - **Value**: `ShareAmount`, `AssetAmount`, percent scale constants
//! - **Chain Context**: `AccountObject`, `AssetObject`, `ChainParameters`,
//!   `DynamicProperties`

use serde::{Deserialize, Serialize};

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

macro_rules! object_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}.{}", stringify!($name), self.0)
            }
        }
    };
}

object_id!(
    /// Identifier of an account object.
    AccountId
);
object_id!(
    /// Identifier of an asset object.
    AssetId
);
object_id!(
    /// Identifier of a cheque object.
    ChequeId
);
object_id!(
    /// Identifier of a fund object.
    FundId
);
object_id!(
    /// Identifier of a fund deposit object.
    DepositId
);
object_id!(
    /// Identifier of a fund history object.
    FundHistoryId
);

// =============================================================================
// CLUSTER B: VALUE
// =============================================================================

/// Integer share units, the amount atom of every asset.
pub type ShareAmount = i64;

/// Seconds since the UNIX epoch; every chain timestamp uses this resolution.
pub type Timestamp = u64;

/// Seconds in one chain day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Percents are integers in hundred-thousandths: 100_000 == 100%.
pub const PERCENT_SCALE: u32 = 100_000;

/// An amount of a specific asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAmount {
    /// Amount in share units.
    pub amount: ShareAmount,
    /// Asset the amount is denominated in.
    pub asset_id: AssetId,
}

impl AssetAmount {
    /// Creates a new asset amount.
    pub fn new(amount: ShareAmount, asset_id: AssetId) -> Self {
        Self { amount, asset_id }
    }
}

// =============================================================================
// CLUSTER C: CHAIN CONTEXT
// =============================================================================

/// The slice of an account object the economic core reads.
///
/// Account authorization, keys, and the rest of the account model belong to
/// the host chain and never cross this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountObject {
    /// Object id of this account.
    pub id: AccountId,
    /// When set, overdue fund deposits of this account are extended instead
    /// of retired (subject to the hardfork gate).
    pub deposits_autorenewal_enabled: bool,
}

/// The slice of an asset object the economic core reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetObject {
    /// Object id of this asset.
    pub id: AssetId,
    /// Account entitled to issue this asset; fund sub-operations are issued
    /// on its behalf.
    pub issuer: AccountId,
    /// Shares currently in circulation.
    pub current_supply: ShareAmount,
    /// Hard cap on circulation; issuance is clamped to stay below it.
    pub max_supply: ShareAmount,
}

impl AssetObject {
    /// Remaining headroom below the supply cap.
    pub fn supply_headroom(&self) -> ShareAmount {
        self.max_supply.saturating_sub(self.current_supply)
    }
}

/// Consensus parameters the economic core depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParameters {
    /// Seconds between maintenance intervals.
    pub maintenance_interval: u64,
}

impl Default for ChainParameters {
    fn default() -> Self {
        Self {
            maintenance_interval: SECONDS_PER_DAY,
        }
    }
}

/// Per-block dynamic chain state the economic core reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicProperties {
    /// Timestamp of the head block.
    pub head_block_time: Timestamp,
    /// Scheduled start of the next maintenance interval.
    pub next_maintenance_time: Timestamp,
    /// Time of the last budget recalculation.
    pub last_budget_time: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_display() {
        assert_eq!(AccountId(7).to_string(), "AccountId.7");
        assert_eq!(ChequeId(0).to_string(), "ChequeId.0");
    }

    #[test]
    fn test_object_id_ordering_follows_creation_order() {
        let mut ids = vec![DepositId(3), DepositId(1), DepositId(2)];
        ids.sort();
        assert_eq!(ids, vec![DepositId(1), DepositId(2), DepositId(3)]);
    }

    #[test]
    fn test_supply_headroom() {
        let asset = AssetObject {
            id: AssetId(1),
            issuer: AccountId(1),
            current_supply: 900,
            max_supply: 1000,
        };
        assert_eq!(asset.supply_headroom(), 100);
    }

    #[test]
    fn test_supply_headroom_saturates_at_zero() {
        let asset = AssetObject {
            id: AssetId(1),
            issuer: AccountId(1),
            current_supply: 1001,
            max_supply: 1000,
        };
        assert_eq!(asset.supply_headroom(), 0);
    }

    #[test]
    fn test_default_maintenance_interval_is_one_day() {
        assert_eq!(
            ChainParameters::default().maintenance_interval,
            SECONDS_PER_DAY
        );
    }
}
