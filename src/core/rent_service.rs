//! Month-by-month drivers over the engine operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{
    generator::create_rent,
    payment::{allocate_payment, PaymentOrder, PaymentReceipt},
    term::{adjust_term, TermStep},
};
use crate::{
    errors::{RentError, Result},
    ledger::{Contract, ContractTerm, MonthSteps, Period, Rent},
};

/// Counts of what a term update did to the ledger.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TermAdjustment {
    pub created: usize,
    pub rederived: usize,
    pub removed: usize,
}

/// Drives the per-period operations over a whole contract term.
pub struct RentService;

impl RentService {
    /// Builds the ledger of a contract that has none yet, one rent per month
    /// of `term`. Returns the number of rents created.
    pub fn generate(contract: &mut Contract, term: &ContractTerm) -> Result<usize> {
        if !contract.rents.is_empty() {
            return Err(RentError::InvalidInput(format!(
                "contract {} already has {} rents; update its term instead",
                contract.id,
                contract.rents.len()
            )));
        }
        let mut previous: Option<Rent> = None;
        let mut created = 0;
        for date in term.steps() {
            match create_rent(date, term.end, previous.as_ref(), contract) {
                Some(rent) => {
                    previous = Some(rent);
                    created += 1;
                }
                None => break,
            }
        }
        info!(contract = %contract.id, created, "rent ledger generated");
        Ok(created)
    }

    /// Spreads a lump payment over consecutive rents starting at `start`.
    pub fn pay(
        contract: &mut Contract,
        start: NaiveDate,
        mut order: PaymentOrder,
    ) -> Result<PaymentReceipt> {
        if order.amount <= Decimal::ZERO {
            return Err(RentError::InvalidInput(format!(
                "payment amount must be positive, got {}",
                order.amount
            )));
        }
        let first = Period::from_date(start);
        if !contract.rents.contains(first) {
            return Err(RentError::InvalidInput(format!(
                "contract {} has no rent for {}",
                contract.id, first
            )));
        }

        let mut receipt = PaymentReceipt::default();
        let mut previous: Option<Rent> = None;
        for date in MonthSteps::unbounded(start) {
            match allocate_payment(date, previous.as_ref(), contract, &mut order) {
                Some(rent) => {
                    receipt.covered.push(rent.period());
                    previous = Some(rent);
                }
                None => break,
            }
        }
        receipt.remaining = order.remaining();
        info!(
            contract = %contract.id,
            covered = receipt.covered.len(),
            remaining = %receipt.remaining,
            "payment allocated"
        );
        Ok(receipt)
    }

    /// Renews or terminates: reconciles the ledger from `begin` against
    /// `new_end`, re-deriving rents that stay, appending missing ones and
    /// dropping the ones past the new end.
    pub fn update_term(
        contract: &mut Contract,
        begin: NaiveDate,
        new_end: NaiveDate,
    ) -> Result<TermAdjustment> {
        if new_end < begin {
            return Err(RentError::InvalidInput(format!(
                "term end {} precedes {}",
                new_end, begin
            )));
        }
        let start = Period::from_date(begin);
        if let (Some(first), Some(last)) = (contract.rents.first(), contract.rents.last()) {
            if start < first.period() || start > last.period().next() {
                return Err(RentError::InvalidInput(format!(
                    "term update from {} is outside ledger {}..={}",
                    start,
                    first.period(),
                    last.period()
                )));
            }
        }

        let mut adjustment = TermAdjustment::default();
        let mut previous: Option<Rent> = None;
        for date in MonthSteps::unbounded(begin) {
            let Some((rent, step)) = adjust_term(date, new_end, previous.as_ref(), contract) else {
                break;
            };
            match step {
                TermStep::Created => adjustment.created += 1,
                TermStep::Rederived => adjustment.rederived += 1,
                TermStep::Removed(count) => adjustment.removed += count,
            }
            previous = Some(rent);
        }
        info!(
            contract = %contract.id,
            created = adjustment.created,
            rederived = adjustment.rederived,
            removed = adjustment.removed,
            "contract term updated"
        );
        Ok(adjustment)
    }

    /// Re-derives every rent after a property or tax change, keeping the
    /// current ledger range.
    pub fn rederive(contract: &mut Contract) -> Result<TermAdjustment> {
        let range = contract
            .rents
            .first()
            .zip(contract.rents.last())
            .map(|(first, last)| (first.period().first_day(), last.period().first_day()));
        match range {
            Some((Some(begin), Some(end))) => Self::update_term(contract, begin, end),
            Some(_) => Err(RentError::InvalidInput(
                "ledger holds a period outside the calendar".into(),
            )),
            None => Ok(TermAdjustment::default()),
        }
    }

    /// Verifies the ledger invariants: contiguous months, consistent chain
    /// links, cumulative balances, and per-record totals.
    pub fn check(contract: &Contract) -> Result<()> {
        let mut predecessor: Option<&Rent> = None;
        for rent in contract.rents.iter() {
            let period = rent.period();
            let broken = |reason: String| RentError::BrokenChain { period, reason };

            if !rent.is_consistent() {
                return Err(broken(format!(
                    "total {} does not match balance {} plus due {}",
                    rent.total_amount,
                    rent.balance,
                    rent.due_amount()
                )));
            }
            match predecessor {
                None => {
                    if !rent.balance.is_zero() || rent.previous.is_some() {
                        return Err(broken("first rent must open the chain".into()));
                    }
                }
                Some(before) => {
                    if before.period().next() != period {
                        return Err(broken(format!("gap after {}", before.period())));
                    }
                    if rent.previous != Some(before.period()) || before.next != Some(period) {
                        return Err(broken("links do not match neighbours".into()));
                    }
                    if rent.balance != before.total_amount {
                        return Err(broken(format!(
                            "balance {} differs from previous total {}",
                            rent.balance, before.total_amount
                        )));
                    }
                }
            }
            predecessor = Some(rent);
        }
        if let Some(last) = predecessor {
            if last.next.is_some() {
                return Err(RentError::BrokenChain {
                    period: last.period(),
                    reason: "last rent points past the ledger".into(),
                });
            }
        }
        Ok(())
    }
}
