//! Two-phase evaluators for the cheque operations.
//!
//! `evaluate_*` runs every precondition against the database without
//! mutating anything and returns a typed ready-handle; the handle's
//! `apply` consumes it and performs the mutation. Cross-phase state is ids
//! plus lookups, so apply re-resolves each object from the store.

use super::entities::{ChequeObject, ChequeStatus};
use super::errors::ChequeError;
use super::operations::{ChequeCreateOperation, ChequeReverseOperation, ChequeUseOperation};
use crate::ports::outbound::ChequeDatabase;
use shared_types::{AccountId, AssetId, ChequeId, ShareAmount};
use tracing::debug;

// =============================================================================
// CHEQUE CREATE
// =============================================================================

/// Evaluated `cheque_create`, ready to apply.
#[derive(Debug)]
pub struct ChequeCreateReady {
    op: ChequeCreateOperation,
    total_escrow: ShareAmount,
}

/// Checks all `cheque_create` preconditions.
pub fn evaluate_create<D: ChequeDatabase + ?Sized>(
    db: &D,
    op: ChequeCreateOperation,
) -> Result<ChequeCreateReady, ChequeError> {
    op.validate()?;

    if !db.account_exists(op.account_id) {
        return Err(ChequeError::AccountNotFound(op.account_id));
    }
    if !db.asset_exists(op.payee_amount.asset_id) {
        return Err(ChequeError::AssetNotFound(op.payee_amount.asset_id));
    }
    if db.find_cheque_by_code(&op.code).is_some() {
        return Err(ChequeError::DuplicateCode(op.code.clone()));
    }

    let head = db.head_block_time();
    if op.expiration_datetime <= head {
        return Err(ChequeError::ExpirationNotInFuture {
            expiration: op.expiration_datetime,
            head,
        });
    }

    let total_escrow = op
        .payee_amount
        .amount
        .checked_mul(op.payee_count as ShareAmount)
        .ok_or(ChequeError::AmountOverflow)?;

    let available = db.get_balance(op.account_id, op.payee_amount.asset_id);
    if available < total_escrow {
        return Err(ChequeError::InsufficientBalance {
            required: total_escrow,
            available,
        });
    }

    Ok(ChequeCreateReady { op, total_escrow })
}

impl ChequeCreateReady {
    /// Debits the drawer and creates the cheque object.
    ///
    /// Returns the new cheque id, which always equals the id reserved at
    /// the start of apply.
    pub fn apply<D: ChequeDatabase + ?Sized>(self, db: &mut D) -> Result<ChequeId, ChequeError> {
        let Self { op, total_escrow } = self;
        let asset_id = op.payee_amount.asset_id;

        db.adjust_balance(op.account_id, asset_id, -total_escrow);

        let reserved = db.next_cheque_id();
        let head = db.head_block_time();
        let created = db.create_cheque(&mut |id| {
            ChequeObject::new(
                id,
                op.account_id,
                asset_id,
                op.code.clone(),
                op.payee_amount.amount,
                op.payee_count,
                head,
                op.expiration_datetime,
            )
        });

        if created != reserved {
            return Err(ChequeError::Internal(format!(
                "created cheque id {created} does not match reserved id {reserved}"
            )));
        }

        debug!(cheque = %created, drawer = %op.account_id, escrow = total_escrow, "cheque created");
        Ok(created)
    }
}

// =============================================================================
// CHEQUE USE
// =============================================================================

/// Evaluated `cheque_use`, ready to apply.
#[derive(Debug)]
pub struct ChequeUseReady {
    cheque_id: ChequeId,
    redeemer: AccountId,
    asset_id: AssetId,
    amount_payee: ShareAmount,
}

/// Checks all `cheque_use` preconditions.
pub fn evaluate_use<D: ChequeDatabase + ?Sized>(
    db: &D,
    op: ChequeUseOperation,
) -> Result<ChequeUseReady, ChequeError> {
    op.validate()?;

    if !db.account_exists(op.account_id) {
        return Err(ChequeError::AccountNotFound(op.account_id));
    }

    let cheque_id = db
        .find_cheque_by_code(&op.code)
        .ok_or_else(|| ChequeError::CodeNotFound(op.code.clone()))?;
    let cheque = db
        .find_cheque(cheque_id)
        .ok_or(ChequeError::ChequeNotFound(cheque_id))?;

    if cheque.status != ChequeStatus::New {
        return Err(ChequeError::NotRedeemable {
            code: op.code.clone(),
            status: cheque.status,
        });
    }
    if op.amount.amount != cheque.amount_payee {
        return Err(ChequeError::AmountMismatch {
            expected: cheque.amount_payee,
            actual: op.amount.amount,
        });
    }
    if op.amount.asset_id != cheque.asset_id {
        return Err(ChequeError::AssetMismatch {
            expected: cheque.asset_id,
            actual: op.amount.asset_id,
        });
    }
    if cheque.has_payee(op.account_id) {
        return Err(ChequeError::RepeatedRedeemer {
            code: op.code.clone(),
            account: op.account_id,
        });
    }

    Ok(ChequeUseReady {
        cheque_id,
        redeemer: op.account_id,
        asset_id: cheque.asset_id,
        amount_payee: cheque.amount_payee,
    })
}

impl ChequeUseReady {
    /// Consumes the first open slot and credits the redeemer.
    pub fn apply<D: ChequeDatabase + ?Sized>(self, db: &mut D) -> Result<ChequeId, ChequeError> {
        let now = db.head_block_time();

        let mut slot_error = None;
        db.modify_cheque(self.cheque_id, &mut |cheque| {
            if let Err(msg) = cheque.consume_slot(self.redeemer, now) {
                slot_error = Some(msg);
            }
        })?;
        if let Some(msg) = slot_error {
            return Err(ChequeError::Internal(msg.to_string()));
        }

        db.adjust_balance(self.redeemer, self.asset_id, self.amount_payee);

        debug!(cheque = %self.cheque_id, redeemer = %self.redeemer, amount = self.amount_payee, "cheque slot redeemed");
        Ok(self.cheque_id)
    }
}

// =============================================================================
// CHEQUE REVERSE
// =============================================================================

/// Evaluated `cheque_reverse`, ready to apply.
#[derive(Debug)]
pub struct ChequeReverseReady {
    cheque_id: ChequeId,
}

/// Checks all `cheque_reverse` preconditions.
pub fn evaluate_reverse<D: ChequeDatabase + ?Sized>(
    db: &D,
    op: ChequeReverseOperation,
) -> Result<ChequeReverseReady, ChequeError> {
    let cheque = db
        .find_cheque(op.cheque_id)
        .ok_or(ChequeError::ChequeNotFound(op.cheque_id))?;

    if cheque.status != ChequeStatus::New {
        return Err(ChequeError::NotReversible(cheque.status));
    }

    Ok(ChequeReverseReady {
        cheque_id: op.cheque_id,
    })
}

impl ChequeReverseReady {
    /// Refunds the unredeemed escrow and retires the cheque.
    pub fn apply<D: ChequeDatabase + ?Sized>(self, db: &mut D) -> Result<(), ChequeError> {
        reverse_apply(db, self.cheque_id)
    }
}

/// Shared apply path for reversal and expiration retirement: open slots
/// collapse onto the drawer, outstanding escrow returns to the drawer's
/// balance, and the cheque moves to its terminal `Undo` state.
pub(crate) fn reverse_apply<D: ChequeDatabase + ?Sized>(
    db: &mut D,
    cheque_id: ChequeId,
) -> Result<(), ChequeError> {
    let cheque = db
        .find_cheque(cheque_id)
        .ok_or(ChequeError::ChequeNotFound(cheque_id))?;
    let drawer = cheque.drawer;
    let asset_id = cheque.asset_id;
    let refund = cheque.amount_remaining;

    if refund > 0 {
        db.adjust_balance(drawer, asset_id, refund);
    }

    let now = db.head_block_time();
    db.modify_cheque(cheque_id, &mut |cheque| {
        cheque.collapse_to_drawer(now);
    })?;

    debug!(cheque = %cheque_id, drawer = %drawer, refund, "cheque reversed");
    Ok(())
}
