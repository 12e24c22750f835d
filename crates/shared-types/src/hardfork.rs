//! # Hardfork Gate
//!
//! Time-based consensus feature activation. Each predicate is a pure
//! comparison against the head block time; replaying a historical block must
//! reproduce whichever branch was live at that block's timestamp, so the
//! comparison directions below are load-bearing and must never change.

use crate::entities::Timestamp;

/// Activation of deposit autorenewal: overdue deposits of accounts with
/// `deposits_autorenewal_enabled` are extended instead of retired.
pub const HARDFORK_624_TIME: Timestamp = 1_551_268_800; // 2019-02-27 12:00:00 UTC

/// Activation of renewal-by-operation: the extension is submitted as a
/// `deposit_renewal` operation instead of an in-place modification.
pub const HARDFORK_625_TIME: Timestamp = 1_552_305_600; // 2019-03-11 12:00:00 UTC

/// True once deposit autorenewal is live (inclusive of the activation time).
pub fn autorenewal_active(head_block_time: Timestamp) -> bool {
    head_block_time >= HARDFORK_624_TIME
}

/// True once overdue-deposit extension goes through a `deposit_renewal`
/// operation (strictly after the activation time).
pub fn renewal_by_operation_active(head_block_time: Timestamp) -> bool {
    head_block_time > HARDFORK_625_TIME
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_times_are_ordered() {
        assert!(HARDFORK_625_TIME >= HARDFORK_624_TIME);
    }

    #[test]
    fn test_autorenewal_boundary_is_inclusive() {
        assert!(!autorenewal_active(HARDFORK_624_TIME - 1));
        assert!(autorenewal_active(HARDFORK_624_TIME));
        assert!(autorenewal_active(HARDFORK_624_TIME + 1));
    }

    #[test]
    fn test_renewal_by_operation_boundary_is_exclusive() {
        assert!(!renewal_by_operation_active(HARDFORK_625_TIME - 1));
        assert!(!renewal_by_operation_active(HARDFORK_625_TIME));
        assert!(renewal_by_operation_active(HARDFORK_625_TIME + 1));
    }
}
