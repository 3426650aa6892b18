use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use polars::prelude::{DataType, DateChunked, NamedFrom, PlSmallStr, PolarsResult, Series};

/// Formats tried, in order, when a date arrives as text.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

fn epoch() -> NaiveDate {
    NaiveDate::default() // 1970-01-01
}

/// Parses a calendar date from text, returning `None` instead of failing.
///
/// Plain dates are tried first, then date-times (the time part is dropped).
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Polars stores `Date` as days since the unix epoch.
pub(crate) fn date_to_days(date: NaiveDate) -> i32 {
    (date - epoch()).num_days() as i32
}

pub(crate) fn days_to_date(days: i32) -> Option<NaiveDate> {
    epoch().checked_add_signed(Duration::days(days as i64))
}

/// Reads a `Date` column as calendar dates.
pub(crate) fn date_values(dates: &DateChunked) -> impl Iterator<Item = Option<NaiveDate>> + '_ {
    dates.into_iter().map(|days| days.and_then(days_to_date))
}

/// Builds a `Date` column from optional calendar dates.
pub(crate) fn date_series<I>(name: PlSmallStr, dates: I) -> PolarsResult<Series>
where
    I: IntoIterator<Item = Option<NaiveDate>>,
{
    let days: Vec<Option<i32>> = dates.into_iter().map(|d| d.map(date_to_days)).collect();
    Series::new(name, days).cast(&DataType::Date)
}

pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_month_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_day_of_next_month = NaiveDate::from_ymd_opt(next_month_year, next_month, 1)?;
    let last_day_of_current_month = first_day_of_next_month - Duration::days(1);
    Some(last_day_of_current_month.day())
}
