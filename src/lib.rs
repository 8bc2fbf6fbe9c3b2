#![forbid(unsafe_code)]
//! Prodcal — calendrier de production russe (jours chômés, reportés, écourtés).
//!
//! - Sources interchangeables : API à codes journaliers, page HTML, bouchon hors ligne.
//! - Agrégation en cinq listes `MMDD` triées (semaines de 5 et 6 jours).
//! - Export JSON atomique, CSV, statistiques.

pub mod calendar;
pub mod config;
pub mod holidays;
pub mod io;
pub mod model;
pub mod source;
pub mod stats;
pub mod storage;

pub use calendar::{aggregate, aggregate_raw, aggregate_with_overlay, generate, CalendarError};
pub use config::FetchConfig;
pub use holidays::statutory_holidays;
pub use model::{CalendarYear, DayCode, MonthDay, WeekConvention};
pub use source::{DaySource, SourceError, SourceRegistry, UnavailableKind};
pub use stats::CalendarStats;
pub use storage::{JsonStorage, Storage};
