//! Outbound (driven) port of the cheque subsystem.
//!
//! The host chain database contract, narrowed to what cheque evaluation
//! needs: existence checks, balance mutation, and the cheque index with its
//! `by_code` secondary lookup.
//!
//! Mutation goes through `modify_cheque` with a closure so the store can
//! keep its secondary indexes consistent; callers never hold references to
//! stored objects across a mutation.

use crate::domain::entities::ChequeObject;
use crate::domain::errors::ChequeError;
use shared_types::{AccountId, AssetId, ChequeId, ShareAmount, Timestamp};

/// Host chain database as seen by the cheque subsystem.
pub trait ChequeDatabase {
    /// Timestamp of the head block.
    fn head_block_time(&self) -> Timestamp;

    /// True if the account object exists.
    fn account_exists(&self, id: AccountId) -> bool;

    /// True if the asset object exists.
    fn asset_exists(&self, id: AssetId) -> bool;

    /// Balance of `account` in `asset`.
    fn get_balance(&self, account: AccountId, asset: AssetId) -> ShareAmount;

    /// Adds `delta` (which may be negative) to the balance of `account`.
    fn adjust_balance(&mut self, account: AccountId, asset: AssetId, delta: ShareAmount);

    /// `by_code` secondary index lookup.
    fn find_cheque_by_code(&self, code: &str) -> Option<ChequeId>;

    /// Primary index lookup.
    fn find_cheque(&self, id: ChequeId) -> Option<&ChequeObject>;

    /// The id the next created cheque will receive. Ids are monotonic.
    fn next_cheque_id(&self) -> ChequeId;

    /// Creates a cheque: allocates the next id, stores the object produced
    /// by `init`, and returns the id.
    fn create_cheque(&mut self, init: &mut dyn FnMut(ChequeId) -> ChequeObject) -> ChequeId;

    /// Reindex-safe in-place mutation of a stored cheque.
    fn modify_cheque(
        &mut self,
        id: ChequeId,
        mutator: &mut dyn FnMut(&mut ChequeObject),
    ) -> Result<(), ChequeError>;

    /// Ids of all cheques still in their initial status, in id order.
    fn live_cheque_ids(&self) -> Vec<ChequeId>;
}
