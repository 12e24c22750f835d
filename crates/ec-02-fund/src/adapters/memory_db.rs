//! Deterministic in-memory implementation of `FundDatabase`.
//!
//! Backs the test suite and doubles as a reference for what the host chain
//! store must provide. `BTreeMap`-backed indexes keep every iteration in id
//! order across nodes.

use crate::domain::entities::{FundDepositObject, FundHistoryObject, FundObject};
use crate::domain::errors::FundError;
use crate::ports::outbound::FundDatabase;
use shared_types::{
    AccountObject, AssetObject, AccountId, AssetId, ChainParameters, DepositId, DynamicProperties,
    FundHistoryId, FundId, ShareAmount, Timestamp,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// In-memory chain double for the fund subsystem.
#[derive(Debug, Default)]
pub struct InMemoryFundDb {
    dynamic: DynamicProperties,
    parameters: ChainParameters,
    /// Node-local retention option, not consensus state.
    history_size: u32,

    accounts: BTreeMap<AccountId, AccountObject>,
    assets: BTreeMap<AssetId, AssetObject>,
    balances: HashMap<(AccountId, AssetId), ShareAmount>,

    funds: BTreeMap<FundId, FundObject>,
    deposits: BTreeMap<DepositId, FundDepositObject>,
    by_fund: BTreeMap<FundId, BTreeSet<DepositId>>,
    histories: BTreeMap<FundHistoryId, FundHistoryObject>,

    next_fund_id: u64,
    next_deposit_id: u64,
    next_history_id: u64,
}

impl InMemoryFundDb {
    /// Creates an empty store at time zero with a one-day maintenance
    /// interval and no history retention.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account object.
    pub fn with_account(mut self, id: AccountId, deposits_autorenewal_enabled: bool) -> Self {
        self.accounts.insert(
            id,
            AccountObject {
                id,
                deposits_autorenewal_enabled,
            },
        );
        self
    }

    /// Registers an asset object.
    pub fn with_asset(mut self, asset: AssetObject) -> Self {
        self.assets.insert(asset.id, asset);
        self
    }

    /// Sets the dynamic chain clock.
    pub fn with_clock(
        mut self,
        head_block_time: Timestamp,
        next_maintenance_time: Timestamp,
        last_budget_time: Timestamp,
    ) -> Self {
        self.dynamic = DynamicProperties {
            head_block_time,
            next_maintenance_time,
            last_budget_time,
        };
        self
    }

    /// Sets the maintenance interval in seconds.
    pub fn with_maintenance_interval(mut self, seconds: u64) -> Self {
        self.parameters.maintenance_interval = seconds;
        self
    }

    /// Sets the node's history retention in days; zero means full archive.
    pub fn with_history_size(mut self, days: u32) -> Self {
        self.history_size = days;
        self
    }

    /// Creates a fund and its history object; the builder receives the
    /// allocated fund and history ids.
    pub fn insert_fund(
        &mut self,
        build: impl FnOnce(FundId, FundHistoryId) -> FundObject,
    ) -> FundId {
        let fund_id = FundId(self.next_fund_id);
        self.next_fund_id += 1;
        let history_id = FundHistoryId(self.next_history_id);
        self.next_history_id += 1;

        self.histories.insert(
            history_id,
            FundHistoryObject {
                id: history_id,
                fund_id,
                items: Vec::new(),
            },
        );
        self.funds.insert(fund_id, build(fund_id, history_id));
        fund_id
    }

    /// Creates a deposit; the builder receives the allocated id.
    pub fn insert_deposit(
        &mut self,
        build: impl FnOnce(DepositId) -> FundDepositObject,
    ) -> DepositId {
        let id = DepositId(self.next_deposit_id);
        self.next_deposit_id += 1;

        let deposit = build(id);
        self.by_fund.entry(deposit.fund_id).or_default().insert(id);
        self.deposits.insert(id, deposit);
        id
    }

    /// Number of deposit objects in the store.
    pub fn deposit_count(&self) -> usize {
        self.deposits.len()
    }
}

impl FundDatabase for InMemoryFundDb {
    fn head_block_time(&self) -> Timestamp {
        self.dynamic.head_block_time
    }

    fn next_maintenance_time(&self) -> Timestamp {
        self.dynamic.next_maintenance_time
    }

    fn last_budget_time(&self) -> Timestamp {
        self.dynamic.last_budget_time
    }

    fn maintenance_interval(&self) -> u64 {
        self.parameters.maintenance_interval
    }

    fn history_size(&self) -> u32 {
        self.history_size
    }

    fn find_account(&self, id: AccountId) -> Option<&AccountObject> {
        self.accounts.get(&id)
    }

    fn find_asset(&self, id: AssetId) -> Option<&AssetObject> {
        self.assets.get(&id)
    }

    fn get_balance(&self, account: AccountId, asset: AssetId) -> ShareAmount {
        self.balances.get(&(account, asset)).copied().unwrap_or(0)
    }

    fn adjust_balance(&mut self, account: AccountId, asset: AssetId, delta: ShareAmount) {
        *self.balances.entry((account, asset)).or_insert(0) += delta;
    }

    fn bump_current_supply(
        &mut self,
        asset: AssetId,
        delta: ShareAmount,
    ) -> Result<(), FundError> {
        let asset_obj = self
            .assets
            .get_mut(&asset)
            .ok_or(FundError::AssetNotFound(asset))?;
        asset_obj.current_supply += delta;
        Ok(())
    }

    fn check_supply_overflow(&self, asset: AssetId, amount: ShareAmount) -> ShareAmount {
        if amount <= 0 {
            return amount;
        }
        match self.assets.get(&asset) {
            Some(asset_obj) => amount.min(asset_obj.supply_headroom()),
            None => 0,
        }
    }

    fn fund_ids(&self) -> Vec<FundId> {
        self.funds.keys().copied().collect()
    }

    fn find_fund(&self, id: FundId) -> Option<&FundObject> {
        self.funds.get(&id)
    }

    fn modify_fund(
        &mut self,
        id: FundId,
        mutator: &mut dyn FnMut(&mut FundObject),
    ) -> Result<(), FundError> {
        let fund = self.funds.get_mut(&id).ok_or(FundError::FundNotFound(id))?;
        mutator(fund);
        Ok(())
    }

    fn deposits_of_fund(&self, fund: FundId) -> Vec<DepositId> {
        self.by_fund
            .get(&fund)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    fn find_deposit(&self, id: DepositId) -> Option<&FundDepositObject> {
        self.deposits.get(&id)
    }

    fn modify_deposit(
        &mut self,
        id: DepositId,
        mutator: &mut dyn FnMut(&mut FundDepositObject),
    ) -> Result<(), FundError> {
        let deposit = self
            .deposits
            .get_mut(&id)
            .ok_or(FundError::DepositNotFound(id))?;
        let old_fund = deposit.fund_id;

        mutator(deposit);

        if deposit.fund_id != old_fund {
            let new_fund = deposit.fund_id;
            if let Some(ids) = self.by_fund.get_mut(&old_fund) {
                ids.remove(&id);
            }
            self.by_fund.entry(new_fund).or_default().insert(id);
        }
        Ok(())
    }

    fn remove_deposit(&mut self, id: DepositId) {
        if let Some(deposit) = self.deposits.remove(&id) {
            if let Some(ids) = self.by_fund.get_mut(&deposit.fund_id) {
                ids.remove(&id);
            }
        }
    }

    fn find_history(&self, id: FundHistoryId) -> Option<&FundHistoryObject> {
        self.histories.get(&id)
    }

    fn modify_history(
        &mut self,
        id: FundHistoryId,
        mutator: &mut dyn FnMut(&mut FundHistoryObject),
    ) -> Result<(), FundError> {
        let history = self
            .histories
            .get_mut(&id)
            .ok_or(FundError::HistoryNotFound(id))?;
        mutator(history);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_supply_overflow_clamps_to_headroom() {
        let db = InMemoryFundDb::new().with_asset(AssetObject {
            id: AssetId(1),
            issuer: AccountId(1),
            current_supply: 990,
            max_supply: 1_000,
        });
        assert_eq!(db.check_supply_overflow(AssetId(1), 5), 5);
        assert_eq!(db.check_supply_overflow(AssetId(1), 50), 10);
        assert_eq!(db.check_supply_overflow(AssetId(1), -7), -7);
        assert_eq!(db.check_supply_overflow(AssetId(9), 5), 0);
    }

    #[test]
    fn test_deposits_of_fund_returns_id_order() {
        let mut db = InMemoryFundDb::new();
        let fund_id = db.insert_fund(|id, history_id| FundObject {
            id,
            owner: AccountId(1),
            asset_id: AssetId(1),
            balance: 0,
            owner_balance: 0,
            fixed_percent_on_deposits: 0,
            rates_reduction_per_month: 0,
            fund_rates: vec![],
            payment_rates: vec![],
            prev_maintenance_time_on_creation: 0,
            history_id,
            enabled: true,
        });
        let first = db.insert_deposit(|id| deposit(id, fund_id));
        let second = db.insert_deposit(|id| deposit(id, fund_id));

        assert_eq!(db.deposits_of_fund(fund_id), vec![first, second]);
    }

    #[test]
    fn test_remove_deposit_clears_index() {
        let mut db = InMemoryFundDb::new();
        let fund_id = db.insert_fund(|id, history_id| FundObject {
            id,
            owner: AccountId(1),
            asset_id: AssetId(1),
            balance: 0,
            owner_balance: 0,
            fixed_percent_on_deposits: 0,
            rates_reduction_per_month: 0,
            fund_rates: vec![],
            payment_rates: vec![],
            prev_maintenance_time_on_creation: 0,
            history_id,
            enabled: true,
        });
        let dep_id = db.insert_deposit(|id| deposit(id, fund_id));

        db.remove_deposit(dep_id);

        assert!(db.find_deposit(dep_id).is_none());
        assert!(db.deposits_of_fund(fund_id).is_empty());
    }

    fn deposit(id: DepositId, fund_id: FundId) -> FundDepositObject {
        FundDepositObject {
            id,
            account_id: AccountId(2),
            fund_id,
            amount: 100,
            percent: 20_000,
            period: 30,
            datetime_end: 1_000,
            enabled: true,
        }
    }
}
