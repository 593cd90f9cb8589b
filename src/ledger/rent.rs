use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Period;

/// How a payment was settled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    Cheque,
    Transfer,
    DirectDebit,
    Other(String),
}

/// Settlement metadata attached to a paid period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payment {
    pub payment_type: PaymentType,
    pub reference: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

impl Payment {
    pub fn new(
        payment_type: PaymentType,
        reference: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            payment_type,
            reference: reference.into(),
            date,
            description: description.into(),
        }
    }
}

/// One month's invoice.
///
/// `balance` is what was invoiced before this period and `total_amount` what
/// was invoiced through it, so `total_amount == balance + amount + expense +
/// vat_amount`. Payments never touch either value.
///
/// `previous` and `next` are keys into the owning [`RentLedger`](super::RentLedger),
/// which holds every record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rent {
    pub year: i32,
    pub month: u32,
    pub discount: Decimal,
    pub is_vat: bool,
    pub vat_ratio: Decimal,
    pub amount: Decimal,
    pub expense: Decimal,
    pub vat_amount: Decimal,
    pub balance: Decimal,
    pub total_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Period>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Period>,
}

impl Rent {
    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }

    /// The incremental charge for this period alone.
    pub fn due_amount(&self) -> Decimal {
        self.amount + self.expense + self.vat_amount
    }

    pub fn is_paid(&self) -> bool {
        self.payment.is_some()
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.total_amount == self.balance + self.due_amount()
            && (self.is_vat || self.vat_amount.is_zero())
    }
}
