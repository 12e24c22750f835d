//! Deterministic in-memory implementation of `ChequeDatabase`.
//!
//! Backs the test suite and doubles as a reference for what the host chain
//! store must provide. `BTreeMap`-backed primary index keeps iteration in id
//! order across nodes.

use crate::domain::entities::{ChequeObject, ChequeStatus};
use crate::domain::errors::ChequeError;
use crate::ports::outbound::ChequeDatabase;
use shared_types::{AccountId, AssetId, ChequeId, ShareAmount, Timestamp};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// In-memory chain double for the cheque subsystem.
#[derive(Debug, Default)]
pub struct InMemoryChequeDb {
    head_block_time: Timestamp,
    accounts: BTreeSet<AccountId>,
    assets: BTreeSet<AssetId>,
    balances: HashMap<(AccountId, AssetId), ShareAmount>,
    cheques: BTreeMap<ChequeId, ChequeObject>,
    by_code: HashMap<String, ChequeId>,
    next_cheque_id: u64,
}

impl InMemoryChequeDb {
    /// Creates an empty store at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account object.
    pub fn with_account(mut self, id: AccountId) -> Self {
        self.accounts.insert(id);
        self
    }

    /// Registers an asset object.
    pub fn with_asset(mut self, id: AssetId) -> Self {
        self.assets.insert(id);
        self
    }

    /// Registers account and asset, then sets the balance.
    pub fn with_balance(mut self, account: AccountId, asset: AssetId, amount: ShareAmount) -> Self {
        self.accounts.insert(account);
        self.assets.insert(asset);
        self.balances.insert((account, asset), amount);
        self
    }

    /// Sets the head block time.
    pub fn with_head_block_time(mut self, time: Timestamp) -> Self {
        self.head_block_time = time;
        self
    }

    /// Advances the head block time by `seconds`.
    pub fn advance_time(&mut self, seconds: u64) {
        self.head_block_time += seconds;
    }

    /// Number of cheque objects in the store.
    pub fn cheque_count(&self) -> usize {
        self.cheques.len()
    }
}

impl ChequeDatabase for InMemoryChequeDb {
    fn head_block_time(&self) -> Timestamp {
        self.head_block_time
    }

    fn account_exists(&self, id: AccountId) -> bool {
        self.accounts.contains(&id)
    }

    fn asset_exists(&self, id: AssetId) -> bool {
        self.assets.contains(&id)
    }

    fn get_balance(&self, account: AccountId, asset: AssetId) -> ShareAmount {
        self.balances.get(&(account, asset)).copied().unwrap_or(0)
    }

    fn adjust_balance(&mut self, account: AccountId, asset: AssetId, delta: ShareAmount) {
        *self.balances.entry((account, asset)).or_insert(0) += delta;
    }

    fn find_cheque_by_code(&self, code: &str) -> Option<ChequeId> {
        self.by_code.get(code).copied()
    }

    fn find_cheque(&self, id: ChequeId) -> Option<&ChequeObject> {
        self.cheques.get(&id)
    }

    fn next_cheque_id(&self) -> ChequeId {
        ChequeId(self.next_cheque_id)
    }

    fn create_cheque(&mut self, init: &mut dyn FnMut(ChequeId) -> ChequeObject) -> ChequeId {
        let id = ChequeId(self.next_cheque_id);
        self.next_cheque_id += 1;

        let cheque = init(id);
        self.by_code.insert(cheque.code.clone(), id);
        self.cheques.insert(id, cheque);
        id
    }

    fn modify_cheque(
        &mut self,
        id: ChequeId,
        mutator: &mut dyn FnMut(&mut ChequeObject),
    ) -> Result<(), ChequeError> {
        let cheque = self
            .cheques
            .get_mut(&id)
            .ok_or(ChequeError::ChequeNotFound(id))?;
        let old_code = cheque.code.clone();

        mutator(cheque);

        if cheque.code != old_code {
            let new_code = cheque.code.clone();
            self.by_code.remove(&old_code);
            self.by_code.insert(new_code, id);
        }
        Ok(())
    }

    fn live_cheque_ids(&self) -> Vec<ChequeId> {
        self.cheques
            .iter()
            .filter(|(_, cheque)| cheque.status == ChequeStatus::New)
            .map(|(id, _)| *id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balances_default_to_zero() {
        let db = InMemoryChequeDb::new();
        assert_eq!(db.get_balance(AccountId(1), AssetId(1)), 0);
    }

    #[test]
    fn test_adjust_balance_accumulates() {
        let mut db = InMemoryChequeDb::new().with_balance(AccountId(1), AssetId(1), 100);
        db.adjust_balance(AccountId(1), AssetId(1), -30);
        db.adjust_balance(AccountId(1), AssetId(1), 5);
        assert_eq!(db.get_balance(AccountId(1), AssetId(1)), 75);
    }

    #[test]
    fn test_create_cheque_assigns_monotonic_ids() {
        let mut db = InMemoryChequeDb::new();
        let first = db.create_cheque(&mut |id| {
            ChequeObject::new(id, AccountId(1), AssetId(1), "A".into(), 10, 1, 0, 100)
        });
        let second = db.create_cheque(&mut |id| {
            ChequeObject::new(id, AccountId(1), AssetId(1), "B".into(), 10, 1, 0, 100)
        });
        assert_eq!(first, ChequeId(0));
        assert_eq!(second, ChequeId(1));
        assert_eq!(db.next_cheque_id(), ChequeId(2));
    }

    #[test]
    fn test_by_code_index_tracks_creation() {
        let mut db = InMemoryChequeDb::new();
        let id = db.create_cheque(&mut |id| {
            ChequeObject::new(id, AccountId(1), AssetId(1), "XYZ".into(), 10, 2, 0, 100)
        });
        assert_eq!(db.find_cheque_by_code("XYZ"), Some(id));
        assert_eq!(db.find_cheque_by_code("ABC"), None);
    }

    #[test]
    fn test_live_cheque_ids_excludes_terminal_statuses() {
        let mut db = InMemoryChequeDb::new();
        let live = db.create_cheque(&mut |id| {
            ChequeObject::new(id, AccountId(1), AssetId(1), "L".into(), 10, 1, 0, 100)
        });
        let retired = db.create_cheque(&mut |id| {
            ChequeObject::new(id, AccountId(1), AssetId(1), "R".into(), 10, 1, 0, 100)
        });
        db.modify_cheque(retired, &mut |cheque| {
            cheque.collapse_to_drawer(50);
        })
        .unwrap();

        assert_eq!(db.live_cheque_ids(), vec![live]);
    }

    #[test]
    fn test_modify_missing_cheque_fails() {
        let mut db = InMemoryChequeDb::new();
        let result = db.modify_cheque(ChequeId(9), &mut |_| {});
        assert_eq!(result, Err(ChequeError::ChequeNotFound(ChequeId(9))));
    }
}
