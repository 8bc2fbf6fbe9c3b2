use super::{DaySource, SourceError};
use crate::calendar::year_days;
use crate::holidays::{is_single_holiday, is_statutory_holiday};
use crate::model::{DayCode, WeekConvention};
use chrono::Datelike;

/// Source hors ligne : week-ends habituels et jours fériés légaux, sans reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubSource;

impl DaySource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    fn description(&self) -> &str {
        "offline calendar from regular weekends and statutory holidays"
    }

    fn fetch_day_codes(
        &self,
        year: i32,
        week: WeekConvention,
        include_preholiday: bool,
    ) -> Result<Vec<DayCode>, SourceError> {
        let days = year_days(year).map_err(|e| SourceError::malformed("stub", e.to_string()))?;
        Ok(days
            .map(|date| {
                if is_statutory_holiday(date) || week.is_regular_weekend(date.weekday()) {
                    DayCode::OrdinaryNonworking
                } else if include_preholiday
                    && date.succ_opt().is_some_and(|next| {
                        next.year() == date.year() && is_single_holiday(next)
                    })
                {
                    DayCode::Shortened
                } else {
                    DayCode::OrdinaryWorking
                }
            })
            .collect())
    }
}
