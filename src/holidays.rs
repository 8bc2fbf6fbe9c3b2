//! Jours fériés fixes du Code du travail russe (art. 112).

use crate::calendar::{year_days, CalendarError};
use crate::model::{MonthDay, WeekConvention};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Congés du Nouvel An : du 1er au 8 janvier.
const NEW_YEAR_SPAN: u32 = 8;

/// Jours fériés isolés (mois, jour).
const FIXED_HOLIDAYS: [(u32, u32); 6] = [
    (2, 23), // Jour du défenseur de la patrie
    (3, 8),  // Journée internationale des femmes
    (5, 1),  // Fête du printemps et du travail
    (5, 9),  // Jour de la Victoire
    (6, 12), // Jour de la Russie
    (11, 4), // Jour de l'unité nationale
];

fn is_new_year_span(date: NaiveDate) -> bool {
    date.month() == 1 && date.day() <= NEW_YEAR_SPAN
}

/// Vrai si `date` figure dans la table des fêtes isolées (hors Nouvel An).
pub fn is_single_holiday(date: NaiveDate) -> bool {
    FIXED_HOLIDAYS.contains(&(date.month(), date.day()))
}

/// Vrai si `date` est un jour férié légal, quel que soit le jour de la semaine.
pub fn is_statutory_holiday(date: NaiveDate) -> bool {
    is_new_year_span(date) || is_single_holiday(date)
}

/// Jours fériés imposés pour `year` sous la convention `week`.
///
/// Les huit jours du Nouvel An sont toujours inclus ; les autres fêtes ne le
/// sont que si elles ne tombent pas sur un jour de repos habituel.
pub fn statutory_holidays(
    year: i32,
    week: WeekConvention,
) -> Result<BTreeSet<MonthDay>, CalendarError> {
    Ok(year_days(year)?
        .filter(|date| {
            is_new_year_span(*date)
                || (is_single_holiday(*date) && !week.is_regular_weekend(date.weekday()))
        })
        .map(MonthDay::from_date)
        .collect())
}
