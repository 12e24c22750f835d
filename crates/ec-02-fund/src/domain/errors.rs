//! Fund subsystem error types.
//!
//! During maintenance these surface in two ways: object-resolution failures
//! on the fund itself abort that fund's cycle (and only that fund's), while
//! sub-operation validation failures are caught by the engine, logged, and
//! skipped.

use shared_types::{AccountId, AssetId, DepositId, FundHistoryId, FundId, ShareAmount};
use thiserror::Error;

/// Errors of fund maintenance and fund sub-operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FundError {
    /// The fund object does not exist.
    #[error("fund {0} doesn't exist")]
    FundNotFound(FundId),

    /// The fund's asset object does not exist.
    #[error("asset {0} doesn't exist")]
    AssetNotFound(AssetId),

    /// The target account does not exist.
    #[error("account {0} doesn't exist")]
    AccountNotFound(AccountId),

    /// The deposit object does not exist.
    #[error("deposit {0} doesn't exist")]
    DepositNotFound(DepositId),

    /// The fund's history object does not exist.
    #[error("fund history {0} doesn't exist")]
    HistoryNotFound(FundHistoryId),

    /// The deposit was already retired.
    #[error("deposit {0} is disabled")]
    DepositDisabled(DepositId),

    /// A renewal names an account that does not own the deposit.
    #[error("deposit {deposit} belongs to {expected}, not {actual}")]
    DepositAccountMismatch {
        deposit: DepositId,
        expected: AccountId,
        actual: AccountId,
    },

    /// Issuance amounts are strictly positive.
    #[error("issue amount must be positive, got {0}")]
    NonPositiveIssue(ShareAmount),

    /// Renewal percent is strictly positive.
    #[error("renewal percent must be positive")]
    NonPositivePercent,

    /// Fund sub-operations are issued by the asset issuer only.
    #[error("asset {asset} is issued by {expected}, not {actual}")]
    IssuerMismatch {
        asset: AssetId,
        expected: AccountId,
        actual: AccountId,
    },

    /// Issuance would push circulation past the supply cap.
    #[error("issuing {requested} of {asset} exceeds remaining supply {headroom}")]
    SupplyOverflow {
        asset: AssetId,
        requested: ShareAmount,
        headroom: ShareAmount,
    },
}
