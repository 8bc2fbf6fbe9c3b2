use crate::source::SourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("year {0} cannot be represented as a calendar date")]
    InvalidYear(i32),
    #[error("input length mismatch: expected {expected} days, got {five} (5-day) and {six} (6-day)")]
    InputLengthMismatch {
        expected: usize,
        five: usize,
        six: usize,
    },
    #[error("invalid day code {code} at index {index}")]
    InvalidDayCode { index: usize, code: u8 },
    #[error("invalid calendar: {0}")]
    InvalidCalendar(String),
    #[error(transparent)]
    Source(#[from] SourceError),
}
