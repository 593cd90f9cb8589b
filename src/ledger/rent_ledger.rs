use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Period, Rent};
use crate::errors::{RentError, Result};

/// Year to month index owning every [`Rent`] of a contract.
///
/// Keys always form one contiguous monthly run: records are only appended
/// after the tail and only removed from the tail.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RentLedger {
    years: BTreeMap<i32, BTreeMap<u32, Rent>>,
}

impl RentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn len(&self) -> usize {
        self.years.values().map(BTreeMap::len).sum()
    }

    pub fn get(&self, period: Period) -> Option<&Rent> {
        self.years.get(&period.year)?.get(&period.month)
    }

    pub fn get_mut(&mut self, period: Period) -> Option<&mut Rent> {
        self.years.get_mut(&period.year)?.get_mut(&period.month)
    }

    pub fn contains(&self, period: Period) -> bool {
        self.get(period).is_some()
    }

    pub fn first(&self) -> Option<&Rent> {
        self.years.values().next()?.values().next()
    }

    pub fn last(&self) -> Option<&Rent> {
        self.years.values().next_back()?.values().next_back()
    }

    /// Records in chronological order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Rent> + '_ {
        self.years.values().flat_map(BTreeMap::values)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    pub fn months_in(&self, year: i32) -> impl Iterator<Item = &Rent> + '_ {
        self.years.get(&year).into_iter().flat_map(BTreeMap::values)
    }

    /// Records that have no payment attached yet.
    pub fn unpaid(&self) -> impl Iterator<Item = &Rent> + '_ {
        self.iter().filter(|rent| !rent.is_paid())
    }

    /// Cumulative amount invoiced over the whole ledger.
    pub fn total_invoiced(&self) -> Decimal {
        self.last()
            .map(|rent| rent.total_amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Appends a record right after the current tail.
    pub fn insert(&mut self, rent: Rent) -> Result<()> {
        let period = rent.period();
        if self.contains(period) {
            return Err(RentError::DuplicatePeriod(period));
        }
        if let (Some(first), Some(last)) = (self.first(), self.last()) {
            let (first, last) = (first.period(), last.period());
            if period != last.next() {
                return Err(RentError::NonContiguous {
                    period,
                    first,
                    last,
                });
            }
        }
        self.years
            .entry(period.year)
            .or_default()
            .insert(period.month, rent);
        Ok(())
    }

    /// Removes `period` and every later record, returning them in
    /// chronological order. The surviving tail loses its `next` link.
    pub fn truncate_from(&mut self, period: Period) -> Vec<Rent> {
        let mut removed = Vec::new();
        let later_years = self.years.split_off(&(period.year + 1));
        if let Some(months) = self.years.get_mut(&period.year) {
            removed.extend(months.split_off(&period.month).into_values());
            if months.is_empty() {
                self.years.remove(&period.year);
            }
        }
        removed.extend(later_years.into_values().flat_map(BTreeMap::into_values));

        let tail = self.last().map(Rent::period);
        if let Some(tail) = tail.and_then(|tail| self.get_mut(tail)) {
            tail.next = None;
        }
        removed
    }

    /// Whether keys form a single run with no missing month.
    pub fn is_contiguous(&self) -> bool {
        let mut expected: Option<Period> = None;
        for rent in self.iter() {
            let period = rent.period();
            if expected.is_some_and(|expected| expected != period) {
                return false;
            }
            expected = Some(period.next());
        }
        true
    }
}
