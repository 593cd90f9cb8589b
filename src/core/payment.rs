use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ledger::{Contract, Payment, Period, Rent};

/// A lump payment being spread over consecutive rents.
///
/// `remaining` starts at `amount` and drops by each covered period's due
/// amount. It goes negative when the last covered period was only partly paid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentOrder {
    pub amount: Decimal,
    pub payment: Payment,
    remaining: Decimal,
}

impl PaymentOrder {
    pub fn new(amount: Decimal, payment: Payment) -> Self {
        Self {
            amount,
            payment,
            remaining: amount,
        }
    }

    pub fn remaining(&self) -> Decimal {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining <= Decimal::ZERO
    }
}

/// Outcome of spreading a [`PaymentOrder`] over the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub covered: Vec<Period>,
    pub remaining: Decimal,
}

impl PaymentReceipt {
    /// Money left over once the ledger ran out of rents.
    pub fn unallocated(&self) -> Decimal {
        self.remaining.max(Decimal::ZERO)
    }

    /// Part of the last covered rent that the payment did not settle.
    pub fn shortfall(&self) -> Decimal {
        (-self.remaining).max(Decimal::ZERO)
    }
}

/// Attaches the order's payment to one rent and charges its due amount.
///
/// The first call (`previous == None`) starts at `date`'s month; later calls
/// follow the chain from `previous`. Returns `None` once the order is
/// exhausted or the chain ends. Balances and totals are left untouched.
pub fn allocate_payment(
    date: NaiveDate,
    previous: Option<&Rent>,
    contract: &mut Contract,
    order: &mut PaymentOrder,
) -> Option<Rent> {
    if order.is_exhausted() {
        debug!(remaining = %order.remaining, "payment exhausted");
        return None;
    }
    let period = match previous {
        None => Period::from_date(date),
        Some(previous) => contract
            .rents
            .get(previous.period())
            .map_or(previous.next, |stored| stored.next)?,
    };
    if period != Period::from_date(date) {
        debug!(%period, %date, "payment follows the rent chain, not the caller date");
    }

    let rent = contract.rents.get_mut(period)?;
    rent.payment = Some(order.payment.clone());
    order.remaining -= rent.due_amount();
    debug!(%period, remaining = %order.remaining, "payment attached");
    Some(rent.clone())
}
