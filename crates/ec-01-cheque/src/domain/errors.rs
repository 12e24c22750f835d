//! Cheque subsystem error types.

use super::entities::ChequeStatus;
use shared_types::{AccountId, AssetId, ChequeId, ShareAmount, Timestamp};
use thiserror::Error;

/// Hard failures raised by the evaluate phase of a cheque operation.
///
/// Every variant aborts the operation and leaves state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChequeError {
    /// The drawer or redeemer account does not exist.
    #[error("account {0} doesn't exist")]
    AccountNotFound(AccountId),

    /// The escrow asset does not exist.
    #[error("asset {0} doesn't exist")]
    AssetNotFound(AssetId),

    /// A live cheque already carries this code.
    #[error("cheque with code '{0}' already exists")]
    DuplicateCode(String),

    /// Expiration must lie strictly after the head block time.
    #[error("invalid expiration datetime {expiration}, head block time is {head}")]
    ExpirationNotInFuture {
        expiration: Timestamp,
        head: Timestamp,
    },

    /// Drawer cannot cover the full escrow.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        required: ShareAmount,
        available: ShareAmount,
    },

    /// No cheque carries this code.
    #[error("there is no cheque with code '{0}'")]
    CodeNotFound(String),

    /// No cheque carries this id.
    #[error("there is no cheque with id {0}")]
    ChequeNotFound(ChequeId),

    /// The cheque has already reached a terminal state.
    #[error("cheque code '{code}' has already been used (status {status:?})")]
    NotRedeemable { code: String, status: ChequeStatus },

    /// Only a cheque with open slots can be reversed.
    #[error("incorrect cheque status for reversing (current status {0:?})")]
    NotReversible(ChequeStatus),

    /// Redemption amount must equal the per-payee amount.
    #[error("cheque amount is invalid: expected {expected}, got {actual}")]
    AmountMismatch {
        expected: ShareAmount,
        actual: ShareAmount,
    },

    /// Redemption asset must match the escrow asset.
    #[error("cheque asset is invalid: expected {expected}, got {actual}")]
    AssetMismatch { expected: AssetId, actual: AssetId },

    /// An account redeems at most one slot per cheque.
    #[error("cheque code '{code}' has already been used for account {account}")]
    RepeatedRedeemer { code: String, account: AccountId },

    /// A cheque carries at least one payee slot.
    #[error("payee count must be at least 1")]
    InvalidPayeeCount,

    /// The redemption code must not be empty.
    #[error("cheque code must not be empty")]
    EmptyCode,

    /// Per-payee amount must be positive.
    #[error("payee amount must be positive, got {0}")]
    NonPositiveAmount(ShareAmount),

    /// The total escrow does not fit in share units.
    #[error("escrow amount overflows share units")]
    AmountOverflow,

    /// Host database invariant violation; not reachable through the public
    /// evaluate/apply flow.
    #[error("internal: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_diagnostics() {
        let err = ChequeError::InsufficientBalance {
            required: 300,
            available: 120,
        };
        let msg = err.to_string();
        assert!(msg.contains("300"));
        assert!(msg.contains("120"));

        let err = ChequeError::DuplicateCode("X7".to_string());
        assert!(err.to_string().contains("X7"));
    }

    #[test]
    fn test_repeated_redeemer_names_account_and_code() {
        let err = ChequeError::RepeatedRedeemer {
            code: "X7".to_string(),
            account: AccountId(42),
        };
        let msg = err.to_string();
        assert!(msg.contains("X7"));
        assert!(msg.contains("42"));
    }
}
