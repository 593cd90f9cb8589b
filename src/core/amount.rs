use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{Property, Revision};

/// Base rent and expenses billed for one period.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodAmount {
    pub amount: Decimal,
    pub expense: Decimal,
}

impl PeriodAmount {
    /// VAT owed on the period, zero when the contract is not subject to VAT.
    pub fn vat(&self, is_vat: bool, vat_ratio: Decimal) -> Decimal {
        if is_vat {
            (self.amount + self.expense) * vat_ratio
        } else {
            Decimal::ZERO
        }
    }
}

/// Sums property prices (through `revision`) and expenses for one period.
///
/// Expenses are never revised. An empty property list yields zero for both.
pub fn compute_period_amount(revision: &Revision, properties: &[Property]) -> PeriodAmount {
    properties
        .iter()
        .fold(PeriodAmount::default(), |total, property| PeriodAmount {
            amount: total.amount + revision.apply(property.price),
            expense: total.expense + property.expense_or_zero(),
        })
}
