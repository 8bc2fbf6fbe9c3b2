use super::CalendarError;
use chrono::NaiveDate;

pub(crate) fn first_day(year: i32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CalendarError::InvalidYear(year))
}

/// Nombre de jours de l'année (365 ou 366).
pub fn days_in_year(year: i32) -> Result<usize, CalendarError> {
    first_day(year)?;
    let leap = NaiveDate::from_ymd_opt(year, 2, 29).is_some();
    Ok(if leap { 366 } else { 365 })
}

/// Jours de l'année, du 1er janvier au 31 décembre.
pub fn year_days(year: i32) -> Result<impl Iterator<Item = NaiveDate>, CalendarError> {
    let start = first_day(year)?;
    let len = days_in_year(year)?;
    Ok(start.iter_days().take(len))
}
