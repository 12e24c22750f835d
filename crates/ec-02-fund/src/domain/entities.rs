//! Core domain entities for the fund subsystem.

use serde::{Deserialize, Serialize};
use shared_types::{
    AccountId, AssetId, DepositId, FundHistoryId, FundId, ShareAmount, Timestamp,
};

/// One tier of the fund's daily-rate table: applies to any balance at or
/// above its threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundRate {
    /// Minimum fund balance qualifying for this tier.
    pub amount_threshold: ShareAmount,
    /// Daily percent in hundred-thousandths.
    pub day_percent: u32,
}

/// One entry of the fund's payment-rate table, keyed by deposit period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRate {
    /// Deposit period in days.
    pub period: u32,
    /// Percent over the whole period, in hundred-thousandths.
    pub percent: u32,
}

/// Deposit pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundObject {
    /// Object id of this fund.
    pub id: FundId,
    /// Account receiving owner profit and the wind-down payout.
    pub owner: AccountId,
    /// Pool asset.
    pub asset_id: AssetId,
    /// Sum of live deposit principals held by the fund.
    pub balance: ShareAmount,
    /// Principal owed back to the owner at wind-down.
    pub owner_balance: ShareAmount,
    /// When positive, selects owner-profit variant 1 (fixed share of the
    /// day's depositor payments); otherwise variant 2 runs.
    pub fixed_percent_on_deposits: u32,
    /// Monthly linear decay applied to the variant-2 daily rate, in
    /// hundred-thousandths.
    pub rates_reduction_per_month: u32,
    /// Daily-rate tiers.
    pub fund_rates: Vec<FundRate>,
    /// Per-period payment rates.
    pub payment_rates: Vec<PaymentRate>,
    /// Reference epoch for the variant-2 rate decay.
    pub prev_maintenance_time_on_creation: Timestamp,
    /// Bounded ring of per-cycle history items.
    pub history_id: FundHistoryId,
    /// False after `finish`.
    pub enabled: bool,
}

impl FundObject {
    /// Payment rate for `period`, if the table carries one.
    pub fn payment_rate(&self, period: u32) -> Option<&PaymentRate> {
        self.payment_rates.iter().find(|rate| rate.period == period)
    }

    /// The qualifying tier with the maximal threshold not exceeding
    /// `balance`; ties keep the first occurrence. `None` when no tier
    /// qualifies or the table is empty.
    pub fn max_fund_rate(&self, balance: ShareAmount) -> Option<&FundRate> {
        let mut best: Option<&FundRate> = None;
        for rate in &self.fund_rates {
            if balance >= rate.amount_threshold {
                match best {
                    Some(current) if rate.amount_threshold <= current.amount_threshold => {}
                    _ => best = Some(rate),
                }
            }
        }
        best
    }
}

/// A depositor's locked principal inside a fund.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundDepositObject {
    /// Object id of this deposit.
    pub id: DepositId,
    /// Depositor.
    pub account_id: AccountId,
    /// Owning fund.
    pub fund_id: FundId,
    /// Locked principal in share units.
    pub amount: ShareAmount,
    /// Percent over the deposit period, in hundred-thousandths.
    pub percent: u32,
    /// Period in days.
    pub period: u32,
    /// When the lock ends.
    pub datetime_end: Timestamp,
    /// False once retired.
    pub enabled: bool,
}

/// One per-cycle record in a fund's history ring.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// When the cycle ran.
    pub create_datetime: Timestamp,
    /// Variant-2 day profit of the whole fund; zero when variant 1 ran or
    /// no tier qualified.
    pub daily_profit: ShareAmount,
    /// Depositor payments issued this cycle, excluding the owner.
    pub daily_payments_without_owner: ShareAmount,
}

/// Bounded history ring of a fund.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundHistoryObject {
    /// Object id of this history.
    pub id: FundHistoryId,
    /// Fund the history belongs to.
    pub fund_id: FundId,
    /// History items, oldest first.
    pub items: Vec<HistoryItem>,
}
