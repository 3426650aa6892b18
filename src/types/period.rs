//! Calendar periods used to select a slice of the table.

use crate::utils::days_in_month;
use chrono::NaiveDate;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Inclusive range of calendar days.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Anything that resolves to an inclusive [`DateSpan`].
pub trait Period {
    /// Returns `None` when the period does not name a valid calendar range.
    fn date_span(&self) -> Option<DateSpan>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Year(pub i32);

impl Year {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl Period for Year {
    fn date_span(&self) -> Option<DateSpan> {
        Some(DateSpan {
            start: NaiveDate::from_ymd_opt(self.0, 1, 1)?,
            end: NaiveDate::from_ymd_opt(self.0, 12, 31)?,
        })
    }
}

/// A month of a specific year.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Month(pub i32, pub u32);

impl Month {
    pub fn new(month: u32, year: i32) -> Self {
        Self(year, month)
    }
    pub fn year(self) -> i32 {
        self.0
    }
    pub fn month(self) -> u32 {
        self.1
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0, self.1)
    }
}

impl Period for Month {
    fn date_span(&self) -> Option<DateSpan> {
        let (year, month) = (self.year(), self.month());
        Some(DateSpan {
            start: NaiveDate::from_ymd_opt(year, month, 1)?,
            end: NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)?,
        })
    }
}

impl Period for NaiveDate {
    fn date_span(&self) -> Option<DateSpan> {
        Some(DateSpan {
            start: *self,
            end: *self,
        })
    }
}

impl Period for DateSpan {
    fn date_span(&self) -> Option<DateSpan> {
        (self.start <= self.end).then_some(*self)
    }
}
