#![doc(test(attr(deny(warnings))))]

//! Rent Core maintains the per-contract rent ledger: one invoice record per
//! calendar month, a running cumulative balance, payment allocation across
//! consecutive periods, and re-derivation when the contract term changes.

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod utils;

pub use crate::core::{
    allocate_payment, compute_period_amount, create_rent, update_term, PaymentOrder,
    PaymentReceipt, PeriodAmount, RentService, TermAdjustment,
};
pub use errors::{RentError, Result};
pub use ledger::{
    Contract, ContractTerm, MonthSteps, Payment, PaymentType, Period, Property, Rent, RentLedger,
    Revision,
};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    init_tracing_once(None);
}

/// Like [`init`], filtering logs with the configured `log_filter`.
pub fn init_with(config: &config::Config) {
    init_tracing_once(Some(&config.log_filter));
}

fn init_tracing_once(directive: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        tracing::info!("Rent Core tracing initialized.");
    });
}
