#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rent_core::{Contract, ContractTerm, Property, Rent, RentService};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Charge per period for [`scenario_contract`]: (100 + 10 + 50) * 1.2.
pub const RENT_AMOUNT: Decimal = dec!(192);
pub const VAT_AMOUNT: Decimal = dec!(32);

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Two properties (100 + 10 expenses, 50), VAT at 20%, no discount.
pub fn scenario_contract() -> Contract {
    Contract::new(vec![
        Property::with_expense(dec!(100), dec!(10)).named("Shop"),
        Property::new(dec!(50)).named("Parking"),
    ])
    .with_vat(dec!(0.2))
}

/// Nine-year lease starting 2000-01-01.
pub fn scenario_term() -> ContractTerm {
    ContractTerm::from_years(date(2000, 1, 1), 9).expect("valid term")
}

pub fn generated_contract() -> Contract {
    let mut contract = scenario_contract();
    RentService::generate(&mut contract, &scenario_term()).expect("generate ledger");
    contract
}

pub fn balances(contract: &Contract) -> Vec<(Decimal, Decimal)> {
    contract
        .rents
        .iter()
        .map(|rent: &Rent| (rent.balance, rent.total_amount))
        .collect()
}

/// Creates an isolated directory that outlives the calling test.
pub fn temp_base_dir() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}
