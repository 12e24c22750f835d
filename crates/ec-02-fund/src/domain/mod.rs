//! Domain layer of the fund subsystem.

pub mod entities;
pub mod errors;
pub mod maintenance;
pub mod operations;
pub mod rates;

pub use entities::{
    FundDepositObject, FundHistoryObject, FundObject, FundRate, HistoryItem, PaymentRate,
};
pub use errors::FundError;
pub use maintenance::{
    finish_fund, process_fund, run_maintenance, FundCycleReport, MaintenanceReport,
};
pub use operations::{
    submit, DepositRenewalOperation, FundOperation, FundPaymentOperation,
    FundWithdrawalOperation, SubOpOutcome,
};
pub use rates::Rate;
