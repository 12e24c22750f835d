//! # Fund Subsystem
//!
//! Interest-bearing deposit pools. Once per maintenance interval the engine
//! walks every enabled fund: pays each enabled deposit its daily accrual,
//! extends or retires overdue deposits, pays the fund owner by one of two
//! mutually exclusive profit formulas, and trims the fund's bounded history.
//!
//! ## Cycle Shape
//!
//! ```text
//! snapshot balance ──→ per-deposit loop ──→ owner profit ──→ deferred
//!                      (payment, overdue      (variant 1 or    deletion +
//!                       renewal/retirement)    variant 2)      history trim
//! ```
//!
//! ## Determinism Rules
//!
//! - Deposits are visited in id order through the `by_fund_id` index.
//! - Every rate product is computed in exact i128 rational arithmetic and
//!   rounded half-away-from-zero to integer shares before touching a
//!   balance; no floating point exists in this crate.
//! - A sub-operation that fails validation is logged and skipped; the cycle
//!   always runs to completion, because a halted cycle would stall block
//!   application identically on every node.
//! - The two hardfork-gated autorenewal paths (in-place modification vs. a
//!   submitted `deposit_renewal` operation) must replay exactly as they ran
//!   at each historical block timestamp.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ports/outbound.rs    - FundDatabase trait (host chain database contract)
//! domain/entities.rs   - FundObject, FundDepositObject, history objects
//! domain/rates.rs      - fixed-point rate policy arithmetic
//! domain/operations.rs - fund_payment / fund_withdrawal / deposit_renewal
//! domain/maintenance.rs- the per-interval cycle, finish, and the driver
//! domain/errors.rs     - FundError enum
//! adapters/            - deterministic in-memory chain double
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use domain::*;
pub use ports::outbound::FundDatabase;
