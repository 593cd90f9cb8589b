use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use super::amount::compute_period_amount;
use crate::{
    errors::RentError,
    ledger::{Contract, Period, Rent},
};

/// Builds the rent for `date`'s month and appends it to the contract ledger.
///
/// Returns `None` once `date` is after `term_end`, which ends the caller's
/// month-by-month iteration. The returned value is a snapshot of the stored
/// record, meant to be handed back as `previous` on the next call.
pub fn create_rent(
    date: NaiveDate,
    term_end: NaiveDate,
    previous: Option<&Rent>,
    contract: &mut Contract,
) -> Option<Rent> {
    if date > term_end {
        debug!(%date, %term_end, "rent date past term end");
        return None;
    }
    let period = Period::from_date(date);
    check_step(period, previous);
    let rent = derive_rent(period, contract, None);
    append(contract, rent)
}

/// Computes every amount of the rent for `period` from the current contract.
///
/// The balance comes from the record stored for the preceding month, so an
/// already re-derived predecessor is always honoured. Payment and the forward
/// link are carried over from `existing`.
pub(crate) fn derive_rent(period: Period, contract: &Contract, existing: Option<&Rent>) -> Rent {
    let totals = compute_period_amount(&contract.revision, &contract.properties);
    let vat_amount = totals.vat(contract.is_vat, contract.vat_ratio);
    let predecessor = contract.rents.get(period.previous());
    let balance = predecessor.map_or(Decimal::ZERO, |rent| rent.total_amount);

    Rent {
        year: period.year,
        month: period.month,
        discount: contract.discount,
        is_vat: contract.is_vat,
        vat_ratio: contract.vat_ratio,
        amount: totals.amount,
        expense: totals.expense,
        vat_amount,
        balance,
        total_amount: balance + totals.amount + totals.expense + vat_amount,
        payment: existing.and_then(|rent| rent.payment.clone()),
        previous: predecessor.map(Rent::period),
        next: existing.and_then(|rent| rent.next),
    }
}

/// Stores `rent` after the ledger tail and links the predecessor forward.
pub(crate) fn append(contract: &mut Contract, rent: Rent) -> Option<Rent> {
    if let Err(err) = contract.rents.insert(rent.clone()) {
        invariant_breach(&err);
        return None;
    }
    let period = rent.period();
    if let Some(predecessor) = rent.previous.and_then(|key| contract.rents.get_mut(key)) {
        predecessor.next = Some(period);
    }
    debug!(%period, total = %rent.total_amount, "rent appended");
    Some(rent)
}

pub(crate) fn check_step(period: Period, previous: Option<&Rent>) {
    if let Some(previous) = previous {
        if previous.period().next() != period {
            warn!(
                %period,
                previous = %previous.period(),
                "caller month is out of step with the previous rent"
            );
        }
    }
}

pub(crate) fn invariant_breach(err: &RentError) {
    error!(error = %err, "rent ledger invariant breached");
    if cfg!(debug_assertions) {
        panic!("rent ledger invariant breached: {err}");
    }
}
