//! # Cheque Subsystem
//!
//! Escrowed bearer receipts: a drawer locks `amount × payee_count` of an
//! asset behind an opaque code; up to `payee_count` distinct accounts redeem
//! one fixed-size slot each, and the drawer can reverse whatever remains
//! unclaimed.
//!
//! ## Cheque State Machine
//!
//! ```text
//! [NEW] ──all slots redeemed──→ [USED]      (terminal)
//!   │
//!   └──reversed by drawer / expired──→ [UNDO]  (terminal)
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | `amount_remaining == amount_payee × open slots` | `ChequeObject::consume_slot` / `collapse_to_drawer` |
//! | One slot per account per cheque | `evaluate_use` repeated-redeemer scan |
//! | Live codes are unique | `evaluate_create` `by_code` lookup |
//! | Terminal states never mutate | status checks in both use/reverse evaluate phases |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ports/outbound.rs   - ChequeDatabase trait (host chain database contract)
//! domain/entities.rs  - ChequeObject, PayeeSlot, status enums
//! domain/evaluators.rs- two-phase evaluate/apply for create, use, reverse
//! domain/services.rs  - expired-cheque sweep
//! domain/errors.rs    - ChequeError enum
//! adapters/           - deterministic in-memory chain double
//! ```
//!
//! Every operation is split into an evaluate phase (pure precondition
//! checks returning a typed ready-handle) and an apply phase (the handle
//! consumes itself against the database). Failure in evaluate leaves state
//! untouched; apply assumes its preconditions and re-resolves every object
//! by id.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use domain::*;
pub use ports::outbound::ChequeDatabase;
