use chrono::{NaiveDate, NaiveDateTime};

use crate::error::GribError;

/// Builds a timestamp from calendar fields, failing with
/// [`GribError::InvalidValue`] for dates and times that do not exist.
#[inline]
pub(crate) fn create_date_time(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<NaiveDateTime, GribError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(|| {
            GribError::InvalidValue(format!(
                "invalid date time: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
            ))
        })
}

/// Full year from edition 1's century and year-of-century fields, where the
/// 21st century runs from 2001 (year of century 1) to 2100 (year of century
/// 100).
pub(crate) fn full_year(century: u8, year_of_century: u8) -> i32 {
    (i32::from(century) - 1) * 100 + i32::from(year_of_century)
}
