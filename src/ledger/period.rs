//! Calendar-month keys, month stepping, and contract terms.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// A billing period: one calendar month, identified by year and month (1-12).
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Builds a period, returning `None` when `month` is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// First calendar day of the period.
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(self, other: Period) -> i64 {
        other.linear_index() - self.linear_index()
    }

    fn linear_index(self) -> i64 {
        self.year as i64 * 12 + self.month as i64 - 1
    }
}

impl From<NaiveDate> for Period {
    fn from(date: NaiveDate) -> Self {
        Period::from_date(date)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Lazily yields `anchor + k months` for k = 0, 1, 2, ...
///
/// Every step is computed from the anchor, so a day-of-month that does not
/// exist in a short month is clamped for that month only (Jan 31, Feb 28,
/// Mar 31). A bounded iterator stops after the last date `<= end`.
#[derive(Debug, Clone)]
pub struct MonthSteps {
    anchor: NaiveDate,
    offset: u32,
    end: Option<NaiveDate>,
}

impl MonthSteps {
    pub fn unbounded(anchor: NaiveDate) -> Self {
        Self {
            anchor,
            offset: 0,
            end: None,
        }
    }

    pub fn through(anchor: NaiveDate, end: NaiveDate) -> Self {
        Self {
            anchor,
            offset: 0,
            end: Some(end),
        }
    }
}

impl Iterator for MonthSteps {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.anchor.checked_add_months(Months::new(self.offset))?;
        if self.end.is_some_and(|end| date > end) {
            return None;
        }
        self.offset += 1;
        Some(date)
    }
}

/// Inclusive date range covered by a contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractTerm {
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

impl ContractTerm {
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Option<Self> {
        (end >= begin).then_some(Self { begin, end })
    }

    /// A term lasting `years` full years: a 9-year lease from 2000-01-01 ends
    /// on 2008-12-31.
    pub fn from_years(begin: NaiveDate, years: u32) -> Option<Self> {
        let end = begin
            .checked_add_months(Months::new(years.checked_mul(12)?))?
            .checked_sub_days(Days::new(1))?;
        Self::new(begin, end)
    }

    /// A term of the configured default length.
    pub fn from_config(begin: NaiveDate, config: &Config) -> Option<Self> {
        Self::from_years(begin, config.default_term_years)
    }

    /// Renewal: pushes the end date forward by `years`.
    pub fn extended_by_years(&self, years: u32) -> Option<Self> {
        let end = self
            .end
            .checked_add_months(Months::new(years.checked_mul(12)?))?;
        Self::new(self.begin, end)
    }

    /// Early termination: pulls the end date back by `years`.
    pub fn shortened_by_years(&self, years: u32) -> Option<Self> {
        let end = self
            .end
            .checked_sub_months(Months::new(years.checked_mul(12)?))?;
        Self::new(self.begin, end)
    }

    pub fn first_period(&self) -> Period {
        Period::from_date(self.begin)
    }

    pub fn last_period(&self) -> Period {
        Period::from_date(self.end)
    }

    /// Number of monthly periods billed over the term.
    pub fn period_count(&self) -> usize {
        MonthSteps::through(self.begin, self.end).count()
    }

    pub fn steps(&self) -> MonthSteps {
        MonthSteps::through(self.begin, self.end)
    }
}
