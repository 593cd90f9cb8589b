use chrono::NaiveDate;
use tracing::debug;

use super::generator::{append, check_step, derive_rent};
use crate::ledger::{Contract, Period, Rent};

/// What a single [`update_term`] step did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TermStep {
    Created,
    Rederived,
    Removed(usize),
}

/// Reconciles `date`'s month with a new contract end date.
///
/// Inside the term an existing rent is re-derived from the current contract
/// (payment kept) and a missing one is appended. Past the term the rent for
/// `date` and everything after it is removed in one step, and the first
/// removed rent is returned. `None` means `date` is past both the ledger and
/// the term.
pub fn update_term(
    date: NaiveDate,
    new_term_end: NaiveDate,
    previous: Option<&Rent>,
    contract: &mut Contract,
) -> Option<Rent> {
    adjust_term(date, new_term_end, previous, contract).map(|(rent, _)| rent)
}

pub(crate) fn adjust_term(
    date: NaiveDate,
    new_term_end: NaiveDate,
    previous: Option<&Rent>,
    contract: &mut Contract,
) -> Option<(Rent, TermStep)> {
    let period = Period::from_date(date);

    if date > new_term_end {
        let reaches = contract
            .rents
            .last()
            .is_some_and(|last| last.period() >= period);
        if !reaches {
            debug!(%period, %new_term_end, "past term end and ledger tail");
            return None;
        }
        let removed = contract.rents.truncate_from(period);
        let count = removed.len();
        debug!(%period, count, "rents past term end removed");
        return removed
            .into_iter()
            .next()
            .map(|rent| (rent, TermStep::Removed(count)));
    }

    check_step(period, previous);
    match contract.rents.get(period) {
        Some(existing) => {
            let rent = derive_rent(period, contract, Some(existing));
            let stored = contract.rents.get_mut(period)?;
            if *stored != rent {
                debug!(%period, total = %rent.total_amount, "rent re-derived");
                *stored = rent.clone();
            }
            Some((rent, TermStep::Rederived))
        }
        None => {
            let rent = derive_rent(period, contract, None);
            append(contract, rent).map(|rent| (rent, TermStep::Created))
        }
    }
}
