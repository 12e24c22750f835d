//! Outbound (driven) port of the fund subsystem.
//!
//! The host chain database contract, narrowed to what fund maintenance
//! needs: dynamic chain state, account/asset context, balance and supply
//! mutation, and the fund/deposit/history indexes.
//!
//! All mutation of stored objects goes through closure-based `modify_*`
//! entry points so the store can keep its secondary indexes consistent;
//! callers re-resolve objects by id instead of holding references across
//! mutations.

use crate::domain::entities::{FundDepositObject, FundHistoryObject, FundObject};
use crate::domain::errors::FundError;
use shared_types::{
    AccountObject, AssetObject, AccountId, AssetId, DepositId, FundHistoryId, FundId,
    ShareAmount, Timestamp,
};

/// Host chain database as seen by the fund subsystem.
pub trait FundDatabase {
    // --- dynamic chain state -------------------------------------------------

    /// Timestamp of the head block.
    fn head_block_time(&self) -> Timestamp;

    /// Scheduled start of the next maintenance interval.
    fn next_maintenance_time(&self) -> Timestamp;

    /// Time of the last budget recalculation.
    fn last_budget_time(&self) -> Timestamp;

    /// Seconds between maintenance intervals.
    fn maintenance_interval(&self) -> u64;

    /// Days of history this node retains; zero means full archive.
    fn history_size(&self) -> u32;

    // --- chain context -------------------------------------------------------

    /// Account lookup.
    fn find_account(&self, id: AccountId) -> Option<&AccountObject>;

    /// Asset lookup.
    fn find_asset(&self, id: AssetId) -> Option<&AssetObject>;

    /// Balance of `account` in `asset`.
    fn get_balance(&self, account: AccountId, asset: AssetId) -> ShareAmount;

    /// Adds `delta` (which may be negative) to the balance of `account`.
    fn adjust_balance(&mut self, account: AccountId, asset: AssetId, delta: ShareAmount);

    /// Records newly issued shares in the asset's circulating supply.
    fn bump_current_supply(&mut self, asset: AssetId, delta: ShareAmount)
        -> Result<(), FundError>;

    /// Clamps an intended issuance to what remains below the supply cap.
    /// Non-positive amounts pass through unchanged; the result may be zero.
    fn check_supply_overflow(&self, asset: AssetId, amount: ShareAmount) -> ShareAmount;

    // --- fund index ----------------------------------------------------------

    /// Ids of all funds, in id order.
    fn fund_ids(&self) -> Vec<FundId>;

    /// Fund lookup.
    fn find_fund(&self, id: FundId) -> Option<&FundObject>;

    /// Reindex-safe in-place mutation of a stored fund.
    fn modify_fund(
        &mut self,
        id: FundId,
        mutator: &mut dyn FnMut(&mut FundObject),
    ) -> Result<(), FundError>;

    // --- deposit index -------------------------------------------------------

    /// Ids of the deposits owned by `fund`, in `by_fund_id` index order.
    fn deposits_of_fund(&self, fund: FundId) -> Vec<DepositId>;

    /// Deposit lookup.
    fn find_deposit(&self, id: DepositId) -> Option<&FundDepositObject>;

    /// Reindex-safe in-place mutation of a stored deposit.
    fn modify_deposit(
        &mut self,
        id: DepositId,
        mutator: &mut dyn FnMut(&mut FundDepositObject),
    ) -> Result<(), FundError>;

    /// Removes a deposit object and its index entries.
    fn remove_deposit(&mut self, id: DepositId);

    // --- history index -------------------------------------------------------

    /// History lookup.
    fn find_history(&self, id: FundHistoryId) -> Option<&FundHistoryObject>;

    /// Reindex-safe in-place mutation of a stored history.
    fn modify_history(
        &mut self,
        id: FundHistoryId,
        mutator: &mut dyn FnMut(&mut FundHistoryObject),
    ) -> Result<(), FundError>;
}
