//! Rent ledger domain models: periods, properties, contracts, and records.

pub mod contract;
pub mod period;
pub mod property;
pub mod rent;
pub mod rent_ledger;

pub use contract::{Contract, Revision};
pub use period::{ContractTerm, MonthSteps, Period};
pub use property::Property;
pub use rent::{Payment, PaymentType, Rent};
pub use rent_ledger::RentLedger;
