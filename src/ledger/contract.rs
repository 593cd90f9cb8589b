use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Property, RentLedger};
use crate::config::Config;

/// Price indexation applied to property prices when computing a period amount.
///
/// Without a `reference_index` the revision is neutral and prices are summed
/// as they are.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Revision {
    pub factor: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_index: Option<Decimal>,
}

impl Revision {
    pub fn neutral() -> Self {
        Self {
            factor: Decimal::ONE,
            reference_index: None,
        }
    }

    pub fn indexed(factor: Decimal, reference_index: Decimal) -> Self {
        Self {
            factor,
            reference_index: Some(reference_index),
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.reference_index.is_none() || self.factor == Decimal::ONE
    }

    pub fn apply(&self, price: Decimal) -> Decimal {
        if self.is_neutral() {
            price
        } else {
            price * self.factor
        }
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::neutral()
    }
}

/// A rental agreement: tax configuration, rented properties, and its ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contract {
    pub id: Uuid,
    pub discount: Decimal,
    pub is_vat: bool,
    pub vat_ratio: Decimal,
    #[serde(default)]
    pub revision: Revision,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub rents: RentLedger,
}

impl Contract {
    /// Creates a contract without VAT or discount and with an empty ledger.
    pub fn new(properties: Vec<Property>) -> Self {
        Self {
            id: Uuid::new_v4(),
            discount: Decimal::ZERO,
            is_vat: false,
            vat_ratio: Decimal::ZERO,
            revision: Revision::neutral(),
            properties,
            rents: RentLedger::new(),
        }
    }

    /// Creates a contract seeded with the configured tax defaults.
    pub fn from_config(config: &Config, properties: Vec<Property>) -> Self {
        Self {
            discount: config.default_discount,
            is_vat: config.default_is_vat,
            vat_ratio: config.default_vat_ratio,
            ..Self::new(properties)
        }
    }

    pub fn with_vat(mut self, vat_ratio: Decimal) -> Self {
        self.is_vat = true;
        self.vat_ratio = vat_ratio;
        self
    }

    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }
}
