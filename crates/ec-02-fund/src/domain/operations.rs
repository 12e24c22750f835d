//! Fund sub-operations.
//!
//! The maintenance engine never touches balances directly for payouts; it
//! submits these operations through `submit`, which runs full validation
//! and application. A validation failure becomes a typed skip outcome that
//! the engine logs and drops — one pathological deposit must not halt a
//! fund's daily cycle.

use super::errors::FundError;
use crate::ports::outbound::FundDatabase;
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, AssetAmount, DepositId, FundId, Timestamp};
use tracing::{debug, warn};

/// Issue the day's accrual (or owner profit) to an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundPaymentOperation {
    /// Asset issuer the operation is issued on behalf of.
    pub issuer: AccountId,
    /// Paying fund.
    pub fund_id: FundId,
    /// Amount and asset to issue.
    pub asset_to_issue: AssetAmount,
    /// Recipient.
    pub issue_to_account: AccountId,
}

/// Return principal out of a fund to an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundWithdrawalOperation {
    /// Asset issuer the operation is issued on behalf of.
    pub issuer: AccountId,
    /// Paying fund.
    pub fund_id: FundId,
    /// Amount and asset to issue.
    pub asset_to_issue: AssetAmount,
    /// Recipient.
    pub issue_to_account: AccountId,
    /// Head block time at submission.
    pub datetime: Timestamp,
}

/// Extend an overdue deposit instead of retiring it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRenewalOperation {
    /// Deposit owner.
    pub account_id: AccountId,
    /// Deposit being extended.
    pub deposit_id: DepositId,
    /// New whole-period percent in hundred-thousandths.
    pub percent: u32,
    /// New lock end.
    pub datetime_end: Timestamp,
}

/// A sub-operation the maintenance engine can submit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundOperation {
    /// Daily accrual or owner-profit issuance.
    Payment(FundPaymentOperation),
    /// Principal return.
    Withdrawal(FundWithdrawalOperation),
    /// Overdue-deposit extension.
    DepositRenewal(DepositRenewalOperation),
}

impl FundOperation {
    /// Full validation against current chain state.
    pub fn validate<D: FundDatabase + ?Sized>(&self, db: &D) -> Result<(), FundError> {
        match self {
            Self::Payment(op) => {
                validate_issue(db, op.issuer, op.fund_id, op.asset_to_issue, op.issue_to_account)
            }
            Self::Withdrawal(op) => {
                validate_issue(db, op.issuer, op.fund_id, op.asset_to_issue, op.issue_to_account)
            }
            Self::DepositRenewal(op) => {
                let deposit = db
                    .find_deposit(op.deposit_id)
                    .ok_or(FundError::DepositNotFound(op.deposit_id))?;
                if !deposit.enabled {
                    return Err(FundError::DepositDisabled(op.deposit_id));
                }
                if deposit.account_id != op.account_id {
                    return Err(FundError::DepositAccountMismatch {
                        deposit: op.deposit_id,
                        expected: deposit.account_id,
                        actual: op.account_id,
                    });
                }
                if op.percent == 0 {
                    return Err(FundError::NonPositivePercent);
                }
                Ok(())
            }
        }
    }

    /// Applies a validated operation.
    pub fn apply<D: FundDatabase + ?Sized>(&self, db: &mut D) -> Result<(), FundError> {
        match self {
            Self::Payment(op) => apply_issue(db, op.asset_to_issue, op.issue_to_account),
            Self::Withdrawal(op) => apply_issue(db, op.asset_to_issue, op.issue_to_account),
            Self::DepositRenewal(op) => {
                let (percent, datetime_end) = (op.percent, op.datetime_end);
                db.modify_deposit(op.deposit_id, &mut |deposit| {
                    deposit.percent = percent;
                    deposit.datetime_end = datetime_end;
                })
            }
        }
    }
}

fn validate_issue<D: FundDatabase + ?Sized>(
    db: &D,
    issuer: AccountId,
    fund_id: FundId,
    asset_to_issue: AssetAmount,
    issue_to_account: AccountId,
) -> Result<(), FundError> {
    if asset_to_issue.amount <= 0 {
        return Err(FundError::NonPositiveIssue(asset_to_issue.amount));
    }

    let asset = db
        .find_asset(asset_to_issue.asset_id)
        .ok_or(FundError::AssetNotFound(asset_to_issue.asset_id))?;
    if asset.issuer != issuer {
        return Err(FundError::IssuerMismatch {
            asset: asset_to_issue.asset_id,
            expected: asset.issuer,
            actual: issuer,
        });
    }

    let headroom = asset.supply_headroom();
    if asset_to_issue.amount > headroom {
        return Err(FundError::SupplyOverflow {
            asset: asset_to_issue.asset_id,
            requested: asset_to_issue.amount,
            headroom,
        });
    }

    if db.find_fund(fund_id).is_none() {
        return Err(FundError::FundNotFound(fund_id));
    }
    if db.find_account(issue_to_account).is_none() {
        return Err(FundError::AccountNotFound(issue_to_account));
    }
    Ok(())
}

fn apply_issue<D: FundDatabase + ?Sized>(
    db: &mut D,
    asset_to_issue: AssetAmount,
    issue_to_account: AccountId,
) -> Result<(), FundError> {
    db.bump_current_supply(asset_to_issue.asset_id, asset_to_issue.amount)?;
    db.adjust_balance(issue_to_account, asset_to_issue.asset_id, asset_to_issue.amount);
    Ok(())
}

/// Outcome of submitting a sub-operation during maintenance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubOpOutcome {
    /// The operation validated and applied.
    Applied,
    /// The operation failed validation or application and was dropped.
    Skipped(FundError),
}

/// Submits a sub-operation through full validation and application.
///
/// Failures never propagate; they are logged and returned as a typed skip
/// outcome so the maintenance cycle always runs to completion.
pub fn submit<D: FundDatabase + ?Sized>(db: &mut D, op: FundOperation) -> SubOpOutcome {
    let result = op.validate(db).and_then(|()| op.apply(db));
    match result {
        Ok(()) => {
            debug!(?op, "fund sub-operation applied");
            SubOpOutcome::Applied
        }
        Err(err) => {
            warn!(?op, %err, "fund sub-operation skipped");
            SubOpOutcome::Skipped(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_db::InMemoryFundDb;
    use crate::domain::entities::FundObject;
    use shared_types::{AssetId, AssetObject};

    const OWNER: AccountId = AccountId(1);
    const DEPOSITOR: AccountId = AccountId(2);
    const ISSUER: AccountId = AccountId(9);
    const ASSET: AssetId = AssetId(1);

    fn make_db() -> (InMemoryFundDb, FundId) {
        let mut db = InMemoryFundDb::new()
            .with_account(OWNER, false)
            .with_account(DEPOSITOR, false)
            .with_account(ISSUER, false)
            .with_asset(AssetObject {
                id: ASSET,
                issuer: ISSUER,
                current_supply: 1_000,
                max_supply: 10_000,
            });
        let fund_id = db.insert_fund(|id, history_id| FundObject {
            id,
            owner: OWNER,
            asset_id: ASSET,
            balance: 500,
            owner_balance: 0,
            fixed_percent_on_deposits: 0,
            rates_reduction_per_month: 0,
            fund_rates: vec![],
            payment_rates: vec![],
            prev_maintenance_time_on_creation: 0,
            history_id,
            enabled: true,
        });
        (db, fund_id)
    }

    fn payment(fund_id: FundId, amount: i64) -> FundOperation {
        FundOperation::Payment(FundPaymentOperation {
            issuer: ISSUER,
            fund_id,
            asset_to_issue: AssetAmount::new(amount, ASSET),
            issue_to_account: DEPOSITOR,
        })
    }

    #[test]
    fn test_payment_issues_balance_and_supply() {
        let (mut db, fund_id) = make_db();
        assert_eq!(submit(&mut db, payment(fund_id, 70)), SubOpOutcome::Applied);
        assert_eq!(db.get_balance(DEPOSITOR, ASSET), 70);
        assert_eq!(db.find_asset(ASSET).unwrap().current_supply, 1_070);
    }

    #[test]
    fn test_payment_rejects_non_positive_amount() {
        let (mut db, fund_id) = make_db();
        let outcome = submit(&mut db, payment(fund_id, 0));
        assert_eq!(outcome, SubOpOutcome::Skipped(FundError::NonPositiveIssue(0)));
        assert_eq!(db.get_balance(DEPOSITOR, ASSET), 0);
    }

    #[test]
    fn test_payment_rejects_wrong_issuer() {
        let (mut db, fund_id) = make_db();
        let op = FundOperation::Payment(FundPaymentOperation {
            issuer: OWNER,
            fund_id,
            asset_to_issue: AssetAmount::new(10, ASSET),
            issue_to_account: DEPOSITOR,
        });
        assert!(matches!(
            submit(&mut db, op),
            SubOpOutcome::Skipped(FundError::IssuerMismatch { .. })
        ));
    }

    #[test]
    fn test_payment_rejects_supply_overflow() {
        let (mut db, fund_id) = make_db();
        let outcome = submit(&mut db, payment(fund_id, 9_500));
        assert_eq!(
            outcome,
            SubOpOutcome::Skipped(FundError::SupplyOverflow {
                asset: ASSET,
                requested: 9_500,
                headroom: 9_000,
            })
        );
    }

    #[test]
    fn test_renewal_rewrites_percent_and_end() {
        let (mut db, fund_id) = make_db();
        let dep_id = db.insert_deposit(|id| crate::domain::entities::FundDepositObject {
            id,
            account_id: DEPOSITOR,
            fund_id,
            amount: 100,
            percent: 20_000,
            period: 30,
            datetime_end: 1_000,
            enabled: true,
        });

        let op = FundOperation::DepositRenewal(DepositRenewalOperation {
            account_id: DEPOSITOR,
            deposit_id: dep_id,
            percent: 25_000,
            datetime_end: 5_000,
        });
        assert_eq!(submit(&mut db, op), SubOpOutcome::Applied);

        let dep = db.find_deposit(dep_id).unwrap();
        assert_eq!(dep.percent, 25_000);
        assert_eq!(dep.datetime_end, 5_000);
    }

    #[test]
    fn test_renewal_rejects_foreign_account() {
        let (mut db, fund_id) = make_db();
        let dep_id = db.insert_deposit(|id| crate::domain::entities::FundDepositObject {
            id,
            account_id: DEPOSITOR,
            fund_id,
            amount: 100,
            percent: 20_000,
            period: 30,
            datetime_end: 1_000,
            enabled: true,
        });

        let op = FundOperation::DepositRenewal(DepositRenewalOperation {
            account_id: OWNER,
            deposit_id: dep_id,
            percent: 25_000,
            datetime_end: 5_000,
        });
        assert!(matches!(
            submit(&mut db, op),
            SubOpOutcome::Skipped(FundError::DepositAccountMismatch { .. })
        ));
    }
}
