//! Domain services for the cheque subsystem.

use super::entities::ChequeStatus;
use super::evaluators::reverse_apply;
use crate::ports::outbound::ChequeDatabase;
use shared_types::ChequeId;
use tracing::{debug, warn};

/// Retires every live cheque whose expiration datetime has passed.
///
/// Each expired cheque is processed exactly like a drawer reversal: open
/// slots collapse onto the drawer, the outstanding escrow returns to the
/// drawer's balance, and the cheque ends in its terminal `Undo` state.
///
/// Returns the retired cheque ids in id order. A cheque the store cannot
/// re-resolve mid-sweep is skipped with a warning; the sweep never aborts.
pub fn sweep_expired<D: ChequeDatabase + ?Sized>(db: &mut D) -> Vec<ChequeId> {
    let now = db.head_block_time();
    let mut retired = Vec::new();

    for cheque_id in db.live_cheque_ids() {
        let expired = match db.find_cheque(cheque_id) {
            Some(cheque) => {
                cheque.status == ChequeStatus::New && cheque.datetime_expiration <= now
            }
            None => false,
        };
        if !expired {
            continue;
        }

        match reverse_apply(db, cheque_id) {
            Ok(()) => retired.push(cheque_id),
            Err(err) => warn!(cheque = %cheque_id, %err, "expired cheque retirement skipped"),
        }
    }

    if !retired.is_empty() {
        debug!(count = retired.len(), "expired cheques retired");
    }
    retired
}
