use super::{http::HttpClient, promote_transfers, DaySource, SourceError};
use crate::calendar::days_in_year;
use crate::model::{DayCode, WeekConvention};

const NAME: &str = "isdayoff";

/// API isdayoff.ru : un chiffre par jour de l'année.
#[derive(Debug, Clone)]
pub struct IsDayOffSource {
    http: HttpClient,
    base_url: String,
}

impl IsDayOffSource {
    pub(crate) fn new(http: HttpClient, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn url(&self, year: i32, week: WeekConvention, include_preholiday: bool) -> String {
        format!(
            "{}/api/getdata?year={year}&pre={}&sd={}",
            self.base_url.trim_end_matches('/'),
            u8::from(include_preholiday),
            u8::from(week.is_six_day()),
        )
    }
}

impl DaySource for IsDayOffSource {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "isdayoff.ru day-code API"
    }

    fn fetch_day_codes(
        &self,
        year: i32,
        week: WeekConvention,
        include_preholiday: bool,
    ) -> Result<Vec<DayCode>, SourceError> {
        let body = self.http.get_text(NAME, &self.url(year, week, include_preholiday))?;
        parse_day_codes(year, week, &body)
    }
}

/// Décode la réponse de l'API (`"1111111100…"`) pour `year`.
pub fn parse_day_codes(
    year: i32,
    week: WeekConvention,
    body: &str,
) -> Result<Vec<DayCode>, SourceError> {
    let body = body.trim();
    match body {
        "100" => return Err(SourceError::unavailable(NAME, "invalid date")),
        "101" => return Err(SourceError::unavailable(NAME, "no data for this year")),
        "199" => return Err(SourceError::unavailable(NAME, "service error")),
        _ => {}
    }

    let expected = days_in_year(year).map_err(|e| SourceError::malformed(NAME, e.to_string()))?;
    let count = body.chars().count();
    if count != expected {
        return Err(SourceError::malformed(
            NAME,
            format!("expected {expected} day codes, got {count}"),
        ));
    }

    let mut codes = body
        .chars()
        .enumerate()
        .map(|(index, c)| {
            c.to_digit(10)
                .and_then(|d| DayCode::try_from(d as u8).ok())
                .ok_or_else(|| SourceError::malformed(NAME, format!("bad code {c:?} at index {index}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    promote_transfers(year, week, &mut codes)
        .map_err(|e| SourceError::malformed(NAME, e.to_string()))?;
    Ok(codes)
}
