use crate::calendar::{year_days, CalendarError};
use crate::model::{CalendarYear, MonthDay, WeekConvention};
use chrono::Datelike;
use std::fmt;

/// Heures d'une journée pleine en semaine de 40 heures sur 5 jours.
const HOURS_PER_DAY: u32 = 8;

/// Récapitulatif d'un calendrier de production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarStats {
    pub year: i32,
    pub calendar_days: u32,
    pub working_days: u32,
    pub nonworking_days: u32,
    pub shortened_days: u32,
    /// Norme d'heures, semaine de 40 heures (un jour écourté compte une heure de moins).
    pub hours_40: u32,
    pub working_days6: u32,
    pub nonworking_days6: u32,
    pub shortened_days6: u32,
}

impl CalendarStats {
    pub fn compute(calendar: &CalendarYear) -> Result<Self, CalendarError> {
        let mut calendar_days = 0u32;
        let mut weekdays5 = 0u32;
        let mut weekdays6 = 0u32;
        for date in year_days(calendar.year())? {
            calendar_days += 1;
            if !WeekConvention::FiveDay.is_regular_weekend(date.weekday()) {
                weekdays5 += 1;
            }
            if !WeekConvention::SixDay.is_regular_weekend(date.weekday()) {
                weekdays6 += 1;
            }
        }

        let year = calendar.year();
        let working_days = (weekdays5 + calendar.working_days().len() as u32).saturating_sub(
            off_regular_weekend(year, WeekConvention::FiveDay, calendar.nonworking_days()),
        );
        let shortened_days = calendar.shortened_days().len() as u32;
        let working_days6 = weekdays6.saturating_sub(off_regular_weekend(
            year,
            WeekConvention::SixDay,
            calendar.nonworking_days6(),
        ));

        Ok(Self {
            year: calendar.year(),
            calendar_days,
            working_days,
            nonworking_days: calendar_days - working_days.min(calendar_days),
            shortened_days,
            hours_40: (working_days * HOURS_PER_DAY).saturating_sub(shortened_days),
            working_days6,
            nonworking_days6: calendar_days - working_days6,
            shortened_days6: calendar.shortened_days6().len() as u32,
        })
    }
}

/// Jours chômés qui retirent un jour ouvré : ceux tombant sur un week-end
/// habituel (Nouvel An, jours imposés) sont déjà hors du décompte.
fn off_regular_weekend(year: i32, week: WeekConvention, days: &[MonthDay]) -> u32 {
    days.iter()
        .filter_map(|d| d.in_year(year))
        .filter(|date| !week.is_regular_weekend(date.weekday()))
        .count() as u32
}

impl fmt::Display for CalendarStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Year {}: {} calendar days", self.year, self.calendar_days)?;
        writeln!(
            f,
            "  5-day week: {} working, {} non-working, {} shortened, {} hours (40h week)",
            self.working_days, self.nonworking_days, self.shortened_days, self.hours_40
        )?;
        write!(
            f,
            "  6-day week: {} working, {} non-working, {} shortened",
            self.working_days6, self.nonworking_days6, self.shortened_days6
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{aggregate, aggregate_with_overlay};
    use crate::holidays::statutory_holidays;
    use crate::source::{DaySource, StubSource};

    #[test]
    fn stub_2024_norms() {
        let five = StubSource
            .fetch_day_codes(2024, WeekConvention::FiveDay, true)
            .unwrap();
        let six = StubSource
            .fetch_day_codes(2024, WeekConvention::SixDay, true)
            .unwrap();
        let cal = aggregate(2024, &five, &six).unwrap();
        let stats = CalendarStats::compute(&cal).unwrap();

        // 262 jours de semaine en 2024 ; 1er–5 et 8 janvier + 6 fêtes en semaine = 12
        assert_eq!(stats.calendar_days, 366);
        assert_eq!(stats.working_days, 262 - 12);
        assert_eq!(stats.nonworking_days, 366 - 250);
        assert_eq!(stats.hours_40, 250 * 8 - stats.shortened_days);
        assert!(stats.to_string().starts_with("Year 2024: 366 calendar days"));
    }

    #[test]
    fn weekend_holidays_in_overlay_do_not_reduce_norms() {
        let five = StubSource
            .fetch_day_codes(2023, WeekConvention::FiveDay, true)
            .unwrap();
        let six = StubSource
            .fetch_day_codes(2023, WeekConvention::SixDay, true)
            .unwrap();
        let overlay5 = statutory_holidays(2023, WeekConvention::FiveDay).unwrap();
        let overlay6 = statutory_holidays(2023, WeekConvention::SixDay).unwrap();

        let plain = aggregate(2023, &five, &six).unwrap();
        let overlaid = aggregate_with_overlay(2023, &five, &six, &overlay5, &overlay6).unwrap();
        // 1er, 7 et 8 janvier 2023 tombent un week-end
        assert_eq!(overlaid.nonworking_days().len(), plain.nonworking_days().len() + 3);

        let stats = CalendarStats::compute(&overlaid).unwrap();
        assert_eq!(stats, CalendarStats::compute(&plain).unwrap());
        // 260 jours de semaine, 2–6 janvier et 5 fêtes en semaine
        assert_eq!(stats.working_days, 250);
        assert_eq!(stats.hours_40, 250 * 8 - stats.shortened_days);
        // 312 jours hors dimanche, 2–7 janvier et 6 fêtes
        assert_eq!(stats.working_days6, 300);
    }
}
