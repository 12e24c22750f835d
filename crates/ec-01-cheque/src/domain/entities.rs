//! Core domain entities for the cheque subsystem.
//!
//! A cheque escrows a fixed per-payee amount times a fixed number of payee
//! slots. Slots are consumed in array index order and never grow or shrink
//! after creation.

use serde::{Deserialize, Serialize};
use shared_types::{AccountId, AssetId, ChequeId, ShareAmount, Timestamp};

/// Lifecycle status of a cheque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChequeStatus {
    /// At least one payee slot is still open.
    #[default]
    New,
    /// Every slot was consumed by a redemption. Terminal.
    Used,
    /// Reversed by the drawer (or retired at expiration). Terminal.
    Undo,
}

/// Status of a single payee slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlotStatus {
    /// Slot is open for redemption.
    #[default]
    New,
    /// Slot has been consumed.
    Used,
}

/// One fixed payee position inside a cheque.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeeSlot {
    /// Account that consumed the slot; `None` while the slot is open.
    pub payee: Option<AccountId>,
    /// When the slot was consumed.
    pub datetime_used: Option<Timestamp>,
    /// Slot status.
    pub status: SlotStatus,
}

/// Escrowed bearer receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequeObject {
    /// Object id of this cheque.
    pub id: ChequeId,
    /// Account that funded the cheque.
    pub drawer: AccountId,
    /// Asset of the escrow.
    pub asset_id: AssetId,
    /// Opaque redemption code, unique across live cheques.
    pub code: String,
    /// Fixed amount each redeemer receives.
    pub amount_payee: ShareAmount,
    /// Unredeemed escrow. Always `amount_payee` times the open slot count.
    pub amount_remaining: ShareAmount,
    /// Pre-allocated payee slots; length equals the original payee count.
    pub payees: Vec<PayeeSlot>,
    /// When the cheque was created.
    pub datetime_creation: Timestamp,
    /// When the cheque stops being redeemable.
    pub datetime_expiration: Timestamp,
    /// When the cheque reached a terminal state.
    pub datetime_used: Option<Timestamp>,
    /// Lifecycle status.
    pub status: ChequeStatus,
}

impl ChequeObject {
    /// Creates a new cheque with `payee_count` open slots and the full
    /// escrow amount outstanding.
    pub fn new(
        id: ChequeId,
        drawer: AccountId,
        asset_id: AssetId,
        code: String,
        amount_payee: ShareAmount,
        payee_count: u32,
        datetime_creation: Timestamp,
        datetime_expiration: Timestamp,
    ) -> Self {
        Self {
            id,
            drawer,
            asset_id,
            code,
            amount_payee,
            amount_remaining: amount_payee * payee_count as ShareAmount,
            payees: vec![PayeeSlot::default(); payee_count as usize],
            datetime_creation,
            datetime_expiration,
            datetime_used: None,
            status: ChequeStatus::New,
        }
    }

    /// Number of slots still open for redemption.
    pub fn open_slots(&self) -> usize {
        self.payees
            .iter()
            .filter(|slot| slot.status == SlotStatus::New)
            .count()
    }

    /// Returns true if `account` already consumed one of the slots.
    pub fn has_payee(&self, account: AccountId) -> bool {
        self.payees.iter().any(|slot| slot.payee == Some(account))
    }

    /// Consumes the first open slot for `redeemer`.
    ///
    /// Decrements `amount_remaining` by `amount_payee` and, when the last
    /// slot goes, moves the cheque to its terminal `Used` state.
    ///
    /// # Errors
    /// Returns an error if no open slot remains.
    pub fn consume_slot(&mut self, redeemer: AccountId, now: Timestamp) -> Result<(), &'static str> {
        let slot = self
            .payees
            .iter_mut()
            .find(|slot| slot.status == SlotStatus::New)
            .ok_or("no open payee slot")?;

        slot.payee = Some(redeemer);
        slot.datetime_used = Some(now);
        slot.status = SlotStatus::Used;

        self.amount_remaining -= self.amount_payee;

        if self.payees.iter().all(|slot| slot.status == SlotStatus::Used) {
            self.status = ChequeStatus::Used;
            self.datetime_used = Some(now);
        }
        Ok(())
    }

    /// Collapses every open slot onto the drawer and moves the cheque to its
    /// terminal `Undo` state.
    ///
    /// Returns the escrow that was still outstanding; the caller refunds it
    /// to the drawer's balance.
    pub fn collapse_to_drawer(&mut self, now: Timestamp) -> ShareAmount {
        for slot in &mut self.payees {
            if slot.status == SlotStatus::New {
                slot.payee = Some(self.drawer);
                slot.datetime_used = Some(now);
                slot.status = SlotStatus::Used;
            }
        }
        let refunded = self.amount_remaining;
        self.amount_remaining = 0;
        self.datetime_used = Some(now);
        self.status = ChequeStatus::Undo;
        refunded
    }

    /// Returns true if the escrow invariant holds: remaining amount equals
    /// the per-payee amount times the open slot count.
    pub fn escrow_consistent(&self) -> bool {
        self.amount_remaining == self.amount_payee * self.open_slots() as ShareAmount
    }
}
