use crate::model::{CalendarYear, DayCode, MonthDay, WeekConvention};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Ensembles en cours de remplissage, matérialisés une seule fois en listes triées.
#[derive(Debug, Default)]
pub(super) struct Accumulator {
    nonworking: BTreeSet<MonthDay>,
    nonworking6: BTreeSet<MonthDay>,
    working: BTreeSet<MonthDay>,
    shortened: BTreeSet<MonthDay>,
    shortened6: BTreeSet<MonthDay>,
}

impl Accumulator {
    pub(super) fn classify(&mut self, date: NaiveDate, code: DayCode, week: WeekConvention) {
        let md = MonthDay::from_date(date);
        let weekend = week.is_regular_weekend(date.weekday());
        match (week, code) {
            // un jour déjà chômé par convention n'est pas un jour férié en plus
            (WeekConvention::FiveDay, DayCode::OrdinaryNonworking) if !weekend => {
                self.nonworking.insert(md);
            }
            (WeekConvention::FiveDay, DayCode::Shortened) => {
                self.shortened.insert(md);
            }
            (WeekConvention::FiveDay, DayCode::ForcedWorking) => {
                self.working.insert(md);
            }
            (WeekConvention::SixDay, DayCode::OrdinaryNonworking) if !weekend => {
                self.nonworking6.insert(md);
            }
            (WeekConvention::SixDay, DayCode::Shortened) => {
                self.shortened6.insert(md);
            }
            _ => {}
        }
    }

    /// Ajoute des jours fériés imposés, sauf s'ils sont déjà travaillés ou écourtés.
    pub(super) fn overlay<'a>(
        &mut self,
        week: WeekConvention,
        days: impl IntoIterator<Item = &'a MonthDay>,
    ) {
        for md in days {
            match week {
                WeekConvention::FiveDay => {
                    if !self.working.contains(md) && !self.shortened.contains(md) {
                        self.nonworking.insert(*md);
                    }
                }
                WeekConvention::SixDay => {
                    if !self.shortened6.contains(md) {
                        self.nonworking6.insert(*md);
                    }
                }
            }
        }
    }

    pub(super) fn finish(self, year: i32) -> CalendarYear {
        CalendarYear::from_parts(
            year,
            self.nonworking.into_iter().collect(),
            self.nonworking6.into_iter().collect(),
            self.working.into_iter().collect(),
            self.shortened.into_iter().collect(),
            self.shortened6.into_iter().collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn saturday_holiday_counts_only_for_six_day_week() {
        let mut acc = Accumulator::default();
        // 2024-01-06 : samedi
        acc.classify(date(1, 6), DayCode::OrdinaryNonworking, WeekConvention::FiveDay);
        acc.classify(date(1, 6), DayCode::OrdinaryNonworking, WeekConvention::SixDay);
        let cal = acc.finish(2024);
        assert!(cal.nonworking_days().is_empty());
        assert_eq!(cal.nonworking_days6(), &[MonthDay::new(1, 6).unwrap()]);
    }

    #[test]
    fn forced_working_ignored_in_six_day_view() {
        let mut acc = Accumulator::default();
        acc.classify(date(4, 27), DayCode::ForcedWorking, WeekConvention::SixDay);
        let cal = acc.finish(2024);
        assert!(cal.working_days().is_empty());
        assert!(cal.nonworking_days6().is_empty());
    }

    #[test]
    fn overlay_keeps_categories_disjoint() {
        let mut acc = Accumulator::default();
        let md = MonthDay::new(1, 2).unwrap();
        acc.classify(date(1, 2), DayCode::Shortened, WeekConvention::FiveDay);
        acc.overlay(WeekConvention::FiveDay, &[md]);
        acc.overlay(WeekConvention::SixDay, &[md]);
        let cal = acc.finish(2024);
        assert!(cal.nonworking_days().is_empty());
        assert_eq!(cal.shortened_days(), &[md]);
        assert_eq!(cal.nonworking_days6(), &[md]);
    }
}
