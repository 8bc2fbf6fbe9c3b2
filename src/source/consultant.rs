use super::{http::HttpClient, promote_transfers, DaySource, SourceError};
use crate::calendar::{days_in_year, CalendarError};
use crate::holidays::statutory_holidays;
use crate::model::{DayCode, MonthDay, WeekConvention};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::collections::BTreeSet;

const NAME: &str = "consultant";

const TABLE_PATTERN: &str = r#"(?is)<table[^>]*class\s*=\s*"[^"]*\bcal\b[^"]*"[^>]*>(.*?)</table>"#;
const MONTH_PATTERN: &str = r#"(?is)<th[^>]*class\s*=\s*"[^"]*\bmonth\b[^"]*"[^>]*>(.*?)</th>"#;
const CELL_PATTERN: &str = r#"(?is)<td([^>]*)>(.*?)</td>"#;
const CLASS_PATTERN: &str = r#"(?i)class\s*=\s*"([^"]*)""#;
const TAG_PATTERN: &str = r"<[^>]*>";

const MONTHS_RU: [&str; 12] = [
    "январь", "февраль", "март", "апрель", "май", "июнь", "июль", "август", "сентябрь",
    "октябрь", "ноябрь", "декабрь",
];

/// Calendrier de production publié par consultant.ru (extraction HTML).
#[derive(Debug, Clone)]
pub struct ConsultantSource {
    http: HttpClient,
    base_url: String,
    six_day_suffix: String,
}

impl ConsultantSource {
    pub(crate) fn new(http: HttpClient, base_url: String, six_day_suffix: String) -> Self {
        Self {
            http,
            base_url,
            six_day_suffix,
        }
    }

    fn url(&self, year: i32, week: WeekConvention) -> String {
        let base = self.base_url.trim_end_matches('/');
        match week {
            WeekConvention::FiveDay => format!("{base}/{year}/"),
            WeekConvention::SixDay => format!("{base}/{year}/{}/", self.six_day_suffix),
        }
    }
}

impl DaySource for ConsultantSource {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "consultant.ru calendar page (HTML scraping + statutory holidays)"
    }

    fn fetch_day_codes(
        &self,
        year: i32,
        week: WeekConvention,
        include_preholiday: bool,
    ) -> Result<Vec<DayCode>, SourceError> {
        let html = self.http.get_text(NAME, &self.url(year, week))?;
        parse_calendar_page(year, week, &html, include_preholiday)
    }

    fn overlay(&self, year: i32, week: WeekConvention) -> Result<BTreeSet<MonthDay>, CalendarError> {
        statutory_holidays(year, week)
    }
}

fn regex(pattern: &str) -> Result<Regex, SourceError> {
    Regex::new(pattern).map_err(|e| SourceError::malformed(NAME, e.to_string()))
}

/// Extrait un code par jour depuis la page HTML d'une année.
///
/// Chaque mois est une table `class="cal"` ; les cellules `inactively`
/// appartiennent au mois voisin et sont ignorées.
pub fn parse_calendar_page(
    year: i32,
    week: WeekConvention,
    html: &str,
    include_preholiday: bool,
) -> Result<Vec<DayCode>, SourceError> {
    let table_re = regex(TABLE_PATTERN)?;
    let month_re = regex(MONTH_PATTERN)?;
    let cell_re = regex(CELL_PATTERN)?;
    let class_re = regex(CLASS_PATTERN)?;
    let tag_re = regex(TAG_PATTERN)?;

    let expected = days_in_year(year).map_err(|e| SourceError::malformed(NAME, e.to_string()))?;
    let mut slots: Vec<Option<DayCode>> = vec![None; expected];

    for (ordinal, table) in table_re.captures_iter(html).enumerate() {
        let body = &table[1];
        let month = match month_re.captures(body) {
            Some(cap) => month_from_title(&tag_re.replace_all(&cap[1], ""))
                .ok_or_else(|| SourceError::malformed(NAME, format!("unknown month title {:?}", &cap[1])))?,
            None => ordinal as u32 + 1,
        };

        for cell in cell_re.captures_iter(body) {
            let classes = class_re
                .captures(&cell[1])
                .map(|c| c[1].to_ascii_lowercase())
                .unwrap_or_default();
            if classes.split_whitespace().any(|c| c == "inactively") {
                continue;
            }
            let text = tag_re.replace_all(&cell[2], "");
            let Ok(day) = text.trim().trim_end_matches('*').parse::<u32>() else {
                continue;
            };
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                SourceError::malformed(NAME, format!("no such date {year}-{month:02}-{day:02}"))
            })?;
            let slot = &mut slots[date.ordinal0() as usize];
            if slot.is_some() {
                return Err(SourceError::malformed(NAME, format!("duplicate cell for {date}")));
            }
            *slot = Some(classify_cell(&classes, include_preholiday));
        }
    }

    let mut codes = Vec::with_capacity(expected);
    for (ordinal0, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(code) => codes.push(code),
            None => {
                let missing = NaiveDate::from_yo_opt(year, ordinal0 as u32 + 1)
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| format!("day #{}", ordinal0 + 1));
                return Err(SourceError::malformed(NAME, format!("no cell for {missing}")));
            }
        }
    }

    promote_transfers(year, week, &mut codes)
        .map_err(|e| SourceError::malformed(NAME, e.to_string()))?;
    Ok(codes)
}

fn month_from_title(title: &str) -> Option<u32> {
    let title = title.trim().to_lowercase();
    MONTHS_RU
        .iter()
        .position(|m| title.starts_with(m))
        .map(|idx| idx as u32 + 1)
}

fn classify_cell(classes: &str, include_preholiday: bool) -> DayCode {
    let has = |name: &str| classes.split_whitespace().any(|c| c == name);
    if has("preholiday") {
        if include_preholiday {
            DayCode::Shortened
        } else {
            DayCode::OrdinaryWorking
        }
    } else if has("holiday") || has("weekend") {
        DayCode::OrdinaryNonworking
    } else {
        DayCode::OrdinaryWorking
    }
}
