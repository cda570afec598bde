//! Shared identifiers, traits, and calendar helpers for farm records.

use chrono::{Datelike, Duration, NaiveDate};

/// Opaque numeric identifier assigned by the backing store.
pub type RecordId = i64;

/// Exposes the store-assigned identifier for a record.
pub trait Identifiable {
    fn id(&self) -> RecordId;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Returns the date `months` calendar months before `date`, clamping the day
/// to the end of the target month when the source day does not exist there.
pub fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    shift_month(date, -(months as i32))
}

/// Returns `true` when both dates fall in the same calendar month and year.
pub fn same_calendar_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
