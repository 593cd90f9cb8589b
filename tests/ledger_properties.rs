//! Property-based tests for the rent ledger engine.
//!
//! Integer-valued prices and expenses keep `Decimal` arithmetic exact, so every
//! invariant is checked with plain equality.

mod common;

use chrono::{Months, NaiveDate};
use common::date;
use proptest::prelude::*;
use rent_core::{
    allocate_payment, compute_period_amount, Contract, ContractTerm, MonthSteps, Payment,
    PaymentOrder, PaymentType, Period, Property, RentService, Revision,
};
use rust_decimal::Decimal;

fn property_strat() -> impl Strategy<Value = Property> {
    (1i64..=5_000, prop::option::of(0i64..=500)).prop_map(|(price, expense)| Property {
        name: None,
        price: Decimal::from(price),
        expense: expense.map(Decimal::from),
    })
}

fn contract_strat() -> impl Strategy<Value = Contract> {
    (
        prop::collection::vec(property_strat(), 0..5),
        any::<bool>(),
        0i64..=30,
    )
        .prop_map(|(properties, is_vat, vat_percent)| {
            let mut contract = Contract::new(properties);
            contract.is_vat = is_vat;
            contract.vat_ratio = Decimal::new(vat_percent, 2);
            contract
        })
}

fn term(years: u32) -> ContractTerm {
    ContractTerm::from_years(date(2000, 1, 1), years).expect("valid term")
}

fn end_after(months: u32) -> NaiveDate {
    date(2000, 1, 1)
        .checked_add_months(Months::new(months))
        .and_then(|day| day.pred_opt())
        .expect("valid end")
}

fn keys(contract: &Contract) -> Vec<Period> {
    contract.rents.iter().map(|rent| rent.period()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Amount and expense are the plain sums of prices and expenses.
    #[test]
    fn period_amount_is_additive(properties in prop::collection::vec(property_strat(), 0..8)) {
        let total = compute_period_amount(&Revision::neutral(), &properties);
        let prices: Decimal = properties.iter().map(|p| p.price).sum();
        let expenses: Decimal = properties.iter().map(|p| p.expense.unwrap_or_default()).sum();
        prop_assert_eq!(total.amount, prices);
        prop_assert_eq!(total.expense, expenses);
    }

    /// Every generated rent chains its balance, totals its period, and
    /// carries no VAT when the contract has none.
    #[test]
    fn generated_ledger_is_consistent(mut contract in contract_strat(), years in 1u32..4) {
        RentService::generate(&mut contract, &term(years)).expect("generate");
        prop_assert_eq!(contract.rents.len(), years as usize * 12);

        let rents: Vec<_> = contract.rents.iter().collect();
        for pair in rents.windows(2) {
            prop_assert_eq!(pair[1].balance, pair[0].total_amount);
        }
        for rent in &rents {
            prop_assert_eq!(
                rent.total_amount,
                rent.balance + rent.amount + rent.expense + rent.vat_amount
            );
            if !rent.is_vat {
                prop_assert_eq!(rent.vat_amount, Decimal::ZERO);
            }
        }
        prop_assert!(RentService::check(&contract).is_ok());
    }

    /// Any sequence of term changes leaves a contiguous, consistent ledger
    /// spanning exactly the last requested term.
    #[test]
    fn term_changes_keep_ledger_contiguous(
        mut contract in contract_strat(),
        lengths in prop::collection::vec(1u32..40, 1..6),
    ) {
        RentService::generate(&mut contract, &term(1)).expect("generate");
        for months in &lengths {
            RentService::update_term(&mut contract, date(2000, 1, 1), end_after(*months))
                .expect("update term");
            prop_assert!(contract.rents.is_contiguous());
            prop_assert_eq!(contract.rents.len(), *months as usize);
            prop_assert!(RentService::check(&contract).is_ok());
        }
    }

    /// Payments never move balances or totals.
    #[test]
    fn payment_leaves_balances_alone(
        mut contract in contract_strat(),
        start in 0u32..24,
        amount in 1i64..100_000,
    ) {
        RentService::generate(&mut contract, &term(2)).expect("generate");
        let before = common::balances(&contract);
        let begin = date(2000, 1, 1).checked_add_months(Months::new(start)).unwrap();
        let payment = Payment::new(PaymentType::Transfer, "P", begin, "");

        RentService::pay(&mut contract, begin, PaymentOrder::new(Decimal::from(amount), payment))
            .expect("pay");
        prop_assert_eq!(common::balances(&contract), before);
    }

    /// A payment worth exactly N periods covers N consecutive periods and the
    /// N+1-th call ends the allocation.
    #[test]
    fn exact_payment_covers_exactly_n_periods(
        properties in prop::collection::vec(property_strat(), 1..4),
        start in 0u32..12,
        periods in 1u32..12,
    ) {
        let mut contract = Contract::new(properties);
        RentService::generate(&mut contract, &term(3)).expect("generate");
        let begin = date(2000, 1, 1).checked_add_months(Months::new(start)).unwrap();
        let due = contract.rents.first().expect("rents").due_amount();
        let payment = Payment::new(PaymentType::Cheque, "C", begin, "");
        let mut order = PaymentOrder::new(due * Decimal::from(periods), payment);

        let mut previous = None;
        let mut calls = 0u32;
        for day in MonthSteps::unbounded(begin) {
            calls += 1;
            previous = allocate_payment(day, previous.as_ref(), &mut contract, &mut order);
            if previous.is_none() {
                break;
            }
        }
        prop_assert_eq!(calls, periods + 1);

        let first = Period::from_date(begin);
        let paid: Vec<Period> = keys(&contract)
            .into_iter()
            .filter(|period| contract.rents.get(*period).is_some_and(|rent| rent.is_paid()))
            .collect();
        prop_assert_eq!(paid.len(), periods as usize);
        prop_assert_eq!(paid.first().copied(), Some(first));
        prop_assert_eq!(first.months_until(*paid.last().unwrap()), periods as i64 - 1);
    }
}
