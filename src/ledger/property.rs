use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A rented property contributing a monthly price and optional expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Property {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<Decimal>,
}

impl Property {
    pub fn new(price: Decimal) -> Self {
        Self {
            name: None,
            price,
            expense: None,
        }
    }

    pub fn with_expense(price: Decimal, expense: Decimal) -> Self {
        Self {
            name: None,
            price,
            expense: Some(expense),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Monthly expenses, zero when the property declares none.
    pub fn expense_or_zero(&self) -> Decimal {
        self.expense.unwrap_or(Decimal::ZERO)
    }
}
