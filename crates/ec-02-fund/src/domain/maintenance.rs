//! The per-interval fund maintenance cycle.
//!
//! One pass per enabled fund: daily accrual to every enabled deposit,
//! the overdue test with its two hardfork-gated autorenewal tiers,
//! retirement of still-overdue deposits, owner profit by exactly one of two
//! variants, deferred deletion of retired deposits on non-archive nodes,
//! and history append + trim.
//!
//! The cycle mutates through the database only; every object is re-resolved
//! by id before each mutation, and sub-operation effects are visible to the
//! iterations that follow them.

use super::entities::HistoryItem;
use super::errors::FundError;
use super::operations::{
    submit, DepositRenewalOperation, FundOperation, FundPaymentOperation,
    FundWithdrawalOperation, SubOpOutcome,
};
use super::rates::{days_between, Rate};
use crate::ports::outbound::FundDatabase;
use shared_types::hardfork;
use shared_types::{AssetAmount, FundId, ShareAmount, SECONDS_PER_DAY};
use tracing::{debug, warn};

/// What one fund's maintenance cycle did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FundCycleReport {
    /// Deposit payments issued.
    pub deposit_payments: u32,
    /// Sub-operations that failed validation and were dropped.
    pub skipped_sub_ops: u32,
    /// Overdue deposits extended instead of retired.
    pub renewed: u32,
    /// Deposits retired this cycle.
    pub retired: u32,
    /// Sum of depositor payments issued, excluding the owner.
    pub daily_payments_without_owner: ShareAmount,
    /// Owner payment issued (zero when none).
    pub owner_payment: ShareAmount,
}

/// What a whole maintenance run did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    /// Funds whose cycle completed.
    pub processed: u32,
    /// Funds skipped on a hard resolution failure.
    pub skipped_funds: u32,
    /// Per-fund cycle reports, in fund id order.
    pub reports: Vec<(FundId, FundCycleReport)>,
}

/// Runs one maintenance cycle for a single fund.
///
/// Object-resolution failures on the fund itself abort this fund's cycle;
/// failures of individual sub-operations are logged and skipped.
pub fn process_fund<D: FundDatabase + ?Sized>(
    db: &mut D,
    fund_id: FundId,
) -> Result<FundCycleReport, FundError> {
    let fund = db
        .find_fund(fund_id)
        .cloned()
        .ok_or(FundError::FundNotFound(fund_id))?;
    let asset = db
        .find_asset(fund.asset_id)
        .cloned()
        .ok_or(FundError::AssetNotFound(fund.asset_id))?;

    let head = db.head_block_time();
    let overdue_threshold = db
        .next_maintenance_time()
        .saturating_sub(db.maintenance_interval());

    // The balance may shrink during the deposit loop; variant-2 profit is
    // computed over this cycle-entry snapshot.
    let old_balance = fund.balance;

    let mut report = FundCycleReport::default();
    let mut history_item = HistoryItem {
        create_datetime: head,
        ..HistoryItem::default()
    };
    let mut deps_to_remove = Vec::new();

    for dep_id in db.deposits_of_fund(fund_id) {
        let Some(dep) = db.find_deposit(dep_id).cloned() else {
            continue;
        };
        if !dep.enabled {
            continue;
        }

        // Daily accrual to the depositor.
        let p_rate = fund.payment_rate(dep.period).copied();
        if let Some(rate) = p_rate {
            let quantity = Rate::per_day(dep.percent, rate.period).mul_round(dep.amount);
            if quantity > 0 {
                let clamped = db.check_supply_overflow(fund.asset_id, quantity);
                if clamped > 0 {
                    let op = FundOperation::Payment(FundPaymentOperation {
                        issuer: asset.issuer,
                        fund_id,
                        asset_to_issue: AssetAmount::new(clamped, fund.asset_id),
                        issue_to_account: dep.account_id,
                    });
                    match submit(db, op) {
                        SubOpOutcome::Applied => {
                            report.deposit_payments += 1;
                            report.daily_payments_without_owner += clamped;
                        }
                        SubOpOutcome::Skipped(_) => report.skipped_sub_ops += 1,
                    }
                }
            }
        }

        // Overdue test: the deposit's lock ended before this interval began.
        if overdue_threshold >= dep.datetime_end {
            let mut overdue = true;

            if hardfork::autorenewal_active(head) {
                let autorenew = db
                    .find_account(dep.account_id)
                    .is_some_and(|account| account.deposits_autorenewal_enabled);
                if autorenew {
                    overdue = false;

                    if hardfork::renewal_by_operation_active(head) {
                        let percent =
                            p_rate.map(|rate| rate.percent).unwrap_or(dep.percent);
                        let op = FundOperation::DepositRenewal(DepositRenewalOperation {
                            account_id: dep.account_id,
                            deposit_id: dep_id,
                            percent,
                            datetime_end: dep.datetime_end
                                + SECONDS_PER_DAY * dep.period as u64,
                        });
                        match submit(db, op) {
                            SubOpOutcome::Applied => report.renewed += 1,
                            SubOpOutcome::Skipped(_) => report.skipped_sub_ops += 1,
                        }
                    } else {
                        // Pre-operation path: extend in place from the last
                        // budget time.
                        let last_budget = db.last_budget_time();
                        let new_percent = p_rate.map(|rate| rate.percent);
                        db.modify_deposit(dep_id, &mut |deposit| {
                            if let Some(percent) = new_percent {
                                deposit.percent = percent;
                            }
                            deposit.datetime_end =
                                last_budget + SECONDS_PER_DAY * deposit.period as u64;
                        })?;
                        report.renewed += 1;
                    }
                }
            }

            if overdue {
                deps_to_remove.push(dep_id);

                let op = FundOperation::Withdrawal(FundWithdrawalOperation {
                    issuer: asset.issuer,
                    fund_id,
                    asset_to_issue: AssetAmount::new(dep.amount, fund.asset_id),
                    issue_to_account: dep.account_id,
                    datetime: head,
                });
                if let SubOpOutcome::Skipped(_) = submit(db, op) {
                    report.skipped_sub_ops += 1;
                }

                db.modify_fund(fund_id, &mut |fund| fund.balance -= dep.amount)?;
                db.modify_deposit(dep_id, &mut |deposit| deposit.enabled = false)?;
                report.retired += 1;
            }
        }
    }

    // Owner profit, exactly one variant.
    if fund.fixed_percent_on_deposits > 0 {
        // Variant 1: fixed share of the day's depositor payments.
        let quantity = Rate::from_percent(fund.fixed_percent_on_deposits)
            .mul_round(report.daily_payments_without_owner);
        let clamped = db.check_supply_overflow(fund.asset_id, quantity);
        if clamped > 0 {
            let op = FundOperation::Payment(FundPaymentOperation {
                issuer: asset.issuer,
                fund_id,
                asset_to_issue: AssetAmount::new(clamped, fund.asset_id),
                issue_to_account: fund.owner,
            });
            match submit(db, op) {
                SubOpOutcome::Applied => report.owner_payment = clamped,
                SubOpOutcome::Skipped(_) => report.skipped_sub_ops += 1,
            }
        }
    } else if let Some(fund_rate) = fund.max_fund_rate(old_balance) {
        // Variant 2: tiered daily rate on the cycle-entry balance snapshot.
        let days_passed = days_between(fund.prev_maintenance_time_on_creation, head);
        let rate = Rate::decayed_daily(
            fund_rate.day_percent,
            fund.rates_reduction_per_month,
            days_passed,
        );
        let fund_day_profit = rate.mul_round(old_balance);
        if fund_day_profit > 0 {
            history_item.daily_profit = fund_day_profit;
            history_item.daily_payments_without_owner = report.daily_payments_without_owner;

            // May be negative when depositors were paid more than the fund
            // earned; no payment is issued and nothing flows back.
            let owner_profit = fund_day_profit - report.daily_payments_without_owner;
            let clamped = db.check_supply_overflow(fund.asset_id, owner_profit);
            if clamped > 0 {
                let op = FundOperation::Payment(FundPaymentOperation {
                    issuer: asset.issuer,
                    fund_id,
                    asset_to_issue: AssetAmount::new(clamped, fund.asset_id),
                    issue_to_account: fund.owner,
                });
                match submit(db, op) {
                    SubOpOutcome::Applied => report.owner_payment = clamped,
                    SubOpOutcome::Skipped(_) => report.skipped_sub_ops += 1,
                }
            }
        }
    }

    // Deferred deletion: archive nodes keep retired deposits, disabled.
    let history_size = db.history_size();
    if history_size > 0 {
        for dep_id in &deps_to_remove {
            db.remove_deposit(*dep_id);
        }
    }

    // History append + trim.
    let cutoff = head.saturating_sub(history_size as u64 * SECONDS_PER_DAY);
    db.modify_history(fund.history_id, &mut |history| {
        history.items.push(history_item.clone());
        if history_size > 0 {
            history.items.retain(|item| item.create_datetime >= cutoff);
        }
    })?;

    debug!(
        fund = %fund_id,
        payments = report.deposit_payments,
        retired = report.retired,
        renewed = report.renewed,
        owner_payment = report.owner_payment,
        "fund maintenance cycle complete"
    );
    Ok(report)
}

/// Winds a fund down: returns the owner principal, zeroes it, and disables
/// the fund. Terminal; invoked by the host when the fund's term ends.
pub fn finish_fund<D: FundDatabase + ?Sized>(db: &mut D, fund_id: FundId) -> Result<(), FundError> {
    let fund = db
        .find_fund(fund_id)
        .cloned()
        .ok_or(FundError::FundNotFound(fund_id))?;

    let owner_deps = fund.owner_balance;
    if owner_deps > 0 {
        let asset = db
            .find_asset(fund.asset_id)
            .cloned()
            .ok_or(FundError::AssetNotFound(fund.asset_id))?;
        let op = FundOperation::Withdrawal(FundWithdrawalOperation {
            issuer: asset.issuer,
            fund_id,
            asset_to_issue: AssetAmount::new(owner_deps, fund.asset_id),
            issue_to_account: fund.owner,
            datetime: db.head_block_time(),
        });
        // A failed return leaves the principal accounted on the fund side
        // exactly as the balance decrement below records it.
        submit(db, op);
    }

    db.modify_fund(fund_id, &mut |fund| {
        if owner_deps > 0 {
            fund.balance -= owner_deps;
        }
        fund.owner_balance = 0;
        fund.enabled = false;
    })?;

    debug!(fund = %fund_id, returned = owner_deps, "fund finished");
    Ok(())
}

/// Runs the maintenance cycle over every enabled fund, in fund id order.
///
/// A fund whose cycle fails hard is skipped with a warning; the remaining
/// funds still run.
pub fn run_maintenance<D: FundDatabase + ?Sized>(db: &mut D) -> MaintenanceReport {
    let mut report = MaintenanceReport::default();

    for fund_id in db.fund_ids() {
        let enabled = db.find_fund(fund_id).map(|fund| fund.enabled).unwrap_or(false);
        if !enabled {
            continue;
        }

        match process_fund(db, fund_id) {
            Ok(cycle) => {
                report.processed += 1;
                report.reports.push((fund_id, cycle));
            }
            Err(err) => {
                warn!(fund = %fund_id, %err, "fund maintenance cycle skipped");
                report.skipped_funds += 1;
            }
        }
    }
    report
}
