//! Month arithmetic for series dates.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{ForecastError, Result};

/// First day of the month `offset` months away from `today` (negative = past).
pub fn month_start(today: NaiveDate, offset: i64) -> Result<NaiveDate> {
    let first = today
        .with_day(1)
        .ok_or(ForecastError::DateOutOfRange(offset))?;
    let span: u32 = offset
        .unsigned_abs()
        .try_into()
        .map_err(|_| ForecastError::DateOutOfRange(offset))?;
    let months = Months::new(span);
    let shifted = if offset >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    };
    shifted.ok_or(ForecastError::DateOutOfRange(offset))
}

/// Zero-based calendar month (January = 0).
pub fn month_index(date: NaiveDate) -> u32 {
    date.month0()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_forward_across_year() {
        assert_eq!(month_start(d(2026, 10, 19), 1).unwrap(), d(2026, 11, 1));
        assert_eq!(month_start(d(2026, 10, 31), 4).unwrap(), d(2027, 2, 1));
        assert_eq!(month_start(d(2026, 10, 19), 0).unwrap(), d(2026, 10, 1));
    }

    #[test]
    fn test_backward() {
        assert_eq!(month_start(d(2026, 2, 28), -3).unwrap(), d(2025, 11, 1));
        assert_eq!(month_index(d(2025, 11, 1)), 10);
    }
}
