use crate::calendar::CalendarError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Date sans année, affichée au format `MMDD`.
///
/// L'ordre dérivé (mois, jour) coïncide avec l'ordre lexicographique de la
/// chaîne `MMDD`, donc avec l'ordre chronologique à l'intérieur d'une année.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u8,
    day: u8,
}

impl MonthDay {
    /// Construit un `MonthDay` valide (le 29 février est accepté).
    pub fn new(month: u8, day: u8) -> Option<Self> {
        // 2000 est bissextile : tous les couples mois/jour possibles passent
        NaiveDate::from_ymd_opt(2000, u32::from(month), u32::from(day))?;
        Some(Self { month, day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Date complète pour `year`, `None` pour un 29/02 d'une année non bissextile.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, u32::from(self.month), u32::from(self.day))
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("expected MMDD, got {s:?}"));
        }
        let month: u8 = s[..2].parse().map_err(|_| format!("bad month in {s:?}"))?;
        let day: u8 = s[2..].parse().map_err(|_| format!("bad day in {s:?}"))?;
        Self::new(month, day).ok_or_else(|| format!("no such date: {s:?}"))
    }
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Convention de semaine de travail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekConvention {
    /// Semaine de 5 jours : samedi et dimanche chômés.
    FiveDay,
    /// Semaine de 6 jours : seul le dimanche est chômé.
    SixDay,
}

impl WeekConvention {
    pub fn is_regular_weekend(self, weekday: Weekday) -> bool {
        match self {
            WeekConvention::FiveDay => matches!(weekday, Weekday::Sat | Weekday::Sun),
            WeekConvention::SixDay => weekday == Weekday::Sun,
        }
    }

    pub fn is_six_day(self) -> bool {
        self == WeekConvention::SixDay
    }
}

/// Statut brut d'un jour tel que fourni par une source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCode {
    OrdinaryWorking,
    OrdinaryNonworking,
    Shortened,
    /// Jour de repos habituel travaillé par report (« перенос »).
    ForcedWorking,
}

impl DayCode {
    /// Valeur numérique utilisée sur le fil.
    pub fn as_u8(self) -> u8 {
        match self {
            DayCode::OrdinaryWorking => 0,
            DayCode::OrdinaryNonworking => 1,
            DayCode::Shortened => 2,
            DayCode::ForcedWorking => 4,
        }
    }
}

impl TryFrom<u8> for DayCode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DayCode::OrdinaryWorking),
            1 => Ok(DayCode::OrdinaryNonworking),
            2 => Ok(DayCode::Shortened),
            4 => Ok(DayCode::ForcedWorking),
            other => Err(other),
        }
    }
}

/// Calendrier de production d'une année.
///
/// Valeur immuable : les listes sont triées, sans doublon, et une date
/// n'apparaît que dans une seule catégorie par convention de semaine.
/// La désérialisation passe par `validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "RawCalendarYear")]
pub struct CalendarYear {
    year: i32,
    nonworking_days: Vec<MonthDay>,
    nonworking_days6: Vec<MonthDay>,
    working_days: Vec<MonthDay>,
    shortened_days: Vec<MonthDay>,
    shortened_days6: Vec<MonthDay>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawCalendarYear {
    year: i32,
    nonworking_days: Vec<MonthDay>,
    nonworking_days6: Vec<MonthDay>,
    working_days: Vec<MonthDay>,
    shortened_days: Vec<MonthDay>,
    shortened_days6: Vec<MonthDay>,
}

impl TryFrom<RawCalendarYear> for CalendarYear {
    type Error = CalendarError;

    fn try_from(raw: RawCalendarYear) -> Result<Self, Self::Error> {
        let calendar = CalendarYear::from_parts(
            raw.year,
            raw.nonworking_days,
            raw.nonworking_days6,
            raw.working_days,
            raw.shortened_days,
            raw.shortened_days6,
        );
        calendar.validate().map_err(CalendarError::InvalidCalendar)?;
        Ok(calendar)
    }
}

impl CalendarYear {
    pub(crate) fn from_parts(
        year: i32,
        nonworking_days: Vec<MonthDay>,
        nonworking_days6: Vec<MonthDay>,
        working_days: Vec<MonthDay>,
        shortened_days: Vec<MonthDay>,
        shortened_days6: Vec<MonthDay>,
    ) -> Self {
        Self {
            year,
            nonworking_days,
            nonworking_days6,
            working_days,
            shortened_days,
            shortened_days6,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn nonworking_days(&self) -> &[MonthDay] {
        &self.nonworking_days
    }
    pub fn nonworking_days6(&self) -> &[MonthDay] {
        &self.nonworking_days6
    }
    pub fn working_days(&self) -> &[MonthDay] {
        &self.working_days
    }
    pub fn shortened_days(&self) -> &[MonthDay] {
        &self.shortened_days
    }
    pub fn shortened_days6(&self) -> &[MonthDay] {
        &self.shortened_days6
    }

    /// Listes nommées, dans l'ordre des clés JSON.
    pub fn categories(&self) -> [(&'static str, &[MonthDay]); 5] {
        [
            ("nonworking", self.nonworking_days.as_slice()),
            ("nonworking6", self.nonworking_days6.as_slice()),
            ("working", self.working_days.as_slice()),
            ("shortened", self.shortened_days.as_slice()),
            ("shortened6", self.shortened_days6.as_slice()),
        ]
    }

    /// Vérifie les invariants : tri strict, dates de l'année, catégories disjointes.
    pub fn validate(&self) -> Result<(), String> {
        if NaiveDate::from_ymd_opt(self.year, 1, 1).is_none() {
            return Err(format!("year {} out of range", self.year));
        }
        for (name, days) in self.categories() {
            if !days.windows(2).all(|w| w[0] < w[1]) {
                return Err(format!("{name} days are not strictly ascending"));
            }
            if let Some(bad) = days.iter().find(|d| d.in_year(self.year).is_none()) {
                return Err(format!("{name} contains {bad}, not a date of {}", self.year));
            }
        }
        let five = [&self.nonworking_days, &self.working_days, &self.shortened_days];
        if let Some(dup) = first_shared(&five) {
            return Err(format!("{dup} listed in several 5-day categories"));
        }
        let six = [&self.nonworking_days6, &self.shortened_days6];
        if let Some(dup) = first_shared(&six) {
            return Err(format!("{dup} listed in several 6-day categories"));
        }
        Ok(())
    }
}

fn first_shared(lists: &[&Vec<MonthDay>]) -> Option<MonthDay> {
    for (i, a) in lists.iter().enumerate() {
        for b in lists.iter().skip(i + 1) {
            if let Some(d) = a.iter().find(|d| b.binary_search(*d).is_ok()) {
                return Some(*d);
            }
        }
    }
    None
}
