mod classify;
mod types;
mod util;

pub use types::CalendarError;
pub use util::{days_in_year, year_days};

use crate::model::{CalendarYear, DayCode, MonthDay, WeekConvention};
use crate::source::DaySource;
use classify::Accumulator;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Construit le calendrier à partir des deux séquences de codes (5 et 6 jours).
///
/// L'indice `i` de chaque séquence correspond au 1er janvier + `i` jours.
pub fn aggregate(
    year: i32,
    five_day: &[DayCode],
    six_day: &[DayCode],
) -> Result<CalendarYear, CalendarError> {
    aggregate_with_overlay(year, five_day, six_day, &BTreeSet::new(), &BTreeSet::new())
}

/// Variante d'`aggregate` sur des codes numériques bruts (`0`, `1`, `2`, `4`).
pub fn aggregate_raw(year: i32, five_day: &[u8], six_day: &[u8]) -> Result<CalendarYear, CalendarError> {
    check_lengths(year, five_day.len(), six_day.len())?;
    let five = decode(five_day)?;
    let six = decode(six_day)?;
    aggregate(year, &five, &six)
}

/// Comme `aggregate`, puis ajoute les jours fériés imposés de chaque convention
/// aux jours chômés correspondants.
pub fn aggregate_with_overlay(
    year: i32,
    five_day: &[DayCode],
    six_day: &[DayCode],
    overlay5: &BTreeSet<MonthDay>,
    overlay6: &BTreeSet<MonthDay>,
) -> Result<CalendarYear, CalendarError> {
    check_lengths(year, five_day.len(), six_day.len())?;

    let mut acc = Accumulator::default();
    for ((date, five), six) in year_days(year)?.zip(five_day).zip(six_day) {
        acc.classify(date, *five, WeekConvention::FiveDay);
        acc.classify(date, *six, WeekConvention::SixDay);
    }
    acc.overlay(WeekConvention::FiveDay, overlay5);
    acc.overlay(WeekConvention::SixDay, overlay6);

    Ok(acc.finish(year))
}

/// Interroge `source` pour les deux conventions puis agrège le résultat.
pub fn generate(
    source: &dyn DaySource,
    year: i32,
    include_preholiday: bool,
) -> Result<CalendarYear, CalendarError> {
    days_in_year(year)?;
    info!(source = source.name(), year, "generating production calendar");

    let five = source.fetch_day_codes(year, WeekConvention::FiveDay, include_preholiday)?;
    let six = source.fetch_day_codes(year, WeekConvention::SixDay, include_preholiday)?;
    let overlay5 = source.overlay(year, WeekConvention::FiveDay)?;
    let overlay6 = source.overlay(year, WeekConvention::SixDay)?;
    debug!(
        five = five.len(),
        six = six.len(),
        overlay5 = overlay5.len(),
        overlay6 = overlay6.len(),
        "raw data fetched"
    );

    let calendar = aggregate_with_overlay(year, &five, &six, &overlay5, &overlay6)?;
    info!(
        nonworking = calendar.nonworking_days().len(),
        working = calendar.working_days().len(),
        shortened = calendar.shortened_days().len(),
        "calendar ready"
    );
    Ok(calendar)
}

fn check_lengths(year: i32, five: usize, six: usize) -> Result<(), CalendarError> {
    let expected = days_in_year(year)?;
    if five != expected || six != expected {
        return Err(CalendarError::InputLengthMismatch {
            expected,
            five,
            six,
        });
    }
    Ok(())
}

fn decode(raw: &[u8]) -> Result<Vec<DayCode>, CalendarError> {
    raw.iter()
        .enumerate()
        .map(|(index, &code)| {
            DayCode::try_from(code).map_err(|code| CalendarError::InvalidDayCode { index, code })
        })
        .collect()
}
