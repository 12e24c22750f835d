//! Wire-level payloads of the three cheque operations.
//!
//! Stateless validation here covers only what the payload itself can know;
//! everything that needs chain state lives in the evaluate phase.

use super::errors::ChequeError;
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, AssetAmount, ChequeId, Timestamp};

/// Escrow `payee_amount × payee_count` behind a redemption code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequeCreateOperation {
    /// Drawer funding the cheque.
    pub account_id: AccountId,
    /// Fixed amount each redeemer receives.
    pub payee_amount: AssetAmount,
    /// Number of payee slots.
    pub payee_count: u32,
    /// Opaque redemption code, unique across live cheques.
    pub code: String,
    /// When the cheque stops being redeemable.
    pub expiration_datetime: Timestamp,
}

impl ChequeCreateOperation {
    /// Stateless payload checks.
    pub fn validate(&self) -> Result<(), ChequeError> {
        if self.payee_count < 1 {
            return Err(ChequeError::InvalidPayeeCount);
        }
        if self.code.is_empty() {
            return Err(ChequeError::EmptyCode);
        }
        if self.payee_amount.amount <= 0 {
            return Err(ChequeError::NonPositiveAmount(self.payee_amount.amount));
        }
        Ok(())
    }
}

/// Redeem one payee slot of the cheque carrying `code`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequeUseOperation {
    /// Redeeming account.
    pub account_id: AccountId,
    /// Redemption code presented by the payee.
    pub code: String,
    /// Claimed amount; must match the cheque's per-payee amount and asset.
    pub amount: AssetAmount,
}

impl ChequeUseOperation {
    /// Stateless payload checks.
    pub fn validate(&self) -> Result<(), ChequeError> {
        if self.code.is_empty() {
            return Err(ChequeError::EmptyCode);
        }
        if self.amount.amount <= 0 {
            return Err(ChequeError::NonPositiveAmount(self.amount.amount));
        }
        Ok(())
    }
}

/// Reverse a cheque, returning the unredeemed escrow to the drawer.
///
/// Drawer authority is checked upstream by the host's transaction layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequeReverseOperation {
    /// Cheque to reverse.
    pub cheque_id: ChequeId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AssetId;

    fn create_op() -> ChequeCreateOperation {
        ChequeCreateOperation {
            account_id: AccountId(1),
            payee_amount: AssetAmount::new(10, AssetId(1)),
            payee_count: 3,
            code: "X".to_string(),
            expiration_datetime: 5_000,
        }
    }

    #[test]
    fn test_create_validate_accepts_well_formed() {
        assert!(create_op().validate().is_ok());
    }

    #[test]
    fn test_create_validate_rejects_zero_payees() {
        let mut op = create_op();
        op.payee_count = 0;
        assert_eq!(op.validate(), Err(ChequeError::InvalidPayeeCount));
    }

    #[test]
    fn test_create_validate_rejects_empty_code() {
        let mut op = create_op();
        op.code.clear();
        assert_eq!(op.validate(), Err(ChequeError::EmptyCode));
    }

    #[test]
    fn test_create_validate_rejects_non_positive_amount() {
        let mut op = create_op();
        op.payee_amount.amount = 0;
        assert_eq!(op.validate(), Err(ChequeError::NonPositiveAmount(0)));
    }

    #[test]
    fn test_use_validate_rejects_non_positive_amount() {
        let op = ChequeUseOperation {
            account_id: AccountId(2),
            code: "X".to_string(),
            amount: AssetAmount::new(-5, AssetId(1)),
        };
        assert_eq!(op.validate(), Err(ChequeError::NonPositiveAmount(-5)));
    }
}
