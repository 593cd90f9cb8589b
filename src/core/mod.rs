//! Rent ledger computation engine.
//!
//! Each operation handles exactly one period per call and returns the record
//! it touched, or `None` when the caller's month-by-month iteration should
//! stop. [`RentService`] wraps them in bounded month iterators.

pub mod amount;
pub mod generator;
pub mod payment;
pub mod rent_service;
pub mod term;

pub use amount::{compute_period_amount, PeriodAmount};
pub use generator::create_rent;
pub use payment::{allocate_payment, PaymentOrder, PaymentReceipt};
pub use rent_service::{RentService, TermAdjustment};
pub use term::update_term;
