//! Sources de données journalières (API, page web, bouchon hors ligne).

mod consultant;
mod http;
mod isdayoff;
mod stub;

pub use consultant::{parse_calendar_page, ConsultantSource};
pub use isdayoff::{parse_day_codes, IsDayOffSource};
pub use stub::StubSource;

use crate::calendar::{year_days, CalendarError};
use crate::config::FetchConfig;
use crate::model::{DayCode, MonthDay, WeekConvention};
use chrono::Datelike;
use self::http::HttpClient;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Cause d'indisponibilité d'une source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableKind {
    /// Réseau, statut HTTP ou erreur signalée par le service.
    Unreachable,
    /// Réponse reçue mais inexploitable (longueur, chiffres, balisage).
    Malformed,
}

impl fmt::Display for UnavailableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableKind::Unreachable => f.write_str("unreachable"),
            UnavailableKind::Malformed => f.write_str("malformed data"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("source {provider} unavailable ({kind}): {reason}")]
    Unavailable {
        provider: String,
        kind: UnavailableKind,
        reason: String,
    },
    #[error("unknown source: {0}")]
    UnknownSource(String),
}

impl SourceError {
    pub(crate) fn unavailable(provider: &str, reason: impl Into<String>) -> Self {
        SourceError::Unavailable {
            provider: provider.to_string(),
            kind: UnavailableKind::Unreachable,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(provider: &str, reason: impl Into<String>) -> Self {
        SourceError::Unavailable {
            provider: provider.to_string(),
            kind: UnavailableKind::Malformed,
            reason: reason.into(),
        }
    }

    /// Vrai si la source a répondu avec des données inexploitables.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            SourceError::Unavailable {
                kind: UnavailableKind::Malformed,
                ..
            }
        )
    }
}

/// Fournisseur de codes journaliers pour une année.
pub trait DaySource {
    /// Nom court utilisé pour la sélection (`--source`).
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Un code par jour de `year`, l'indice 0 étant le 1er janvier.
    fn fetch_day_codes(
        &self,
        year: i32,
        week: WeekConvention,
        include_preholiday: bool,
    ) -> Result<Vec<DayCode>, SourceError>;

    /// Jours fériés à ajouter aux jours chômés extraits (aucun par défaut).
    fn overlay(&self, _year: i32, _week: WeekConvention) -> Result<BTreeSet<MonthDay>, CalendarError> {
        Ok(BTreeSet::new())
    }
}

/// Un jour de repos habituel annoncé comme ouvré est un jour reporté.
pub(crate) fn promote_transfers(
    year: i32,
    week: WeekConvention,
    codes: &mut [DayCode],
) -> Result<(), CalendarError> {
    for (date, code) in year_days(year)?.zip(codes.iter_mut()) {
        if *code == DayCode::OrdinaryWorking && week.is_regular_weekend(date.weekday()) {
            *code = DayCode::ForcedWorking;
        }
    }
    Ok(())
}

/// Registre des sources disponibles, construit explicitement par l'appelant.
#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<Box<dyn DaySource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registre par défaut : `isdayoff`, `consultant`, `stub`.
    pub fn standard(config: &FetchConfig) -> Result<Self, SourceError> {
        let http = HttpClient::new(config)?;
        let mut registry = Self::new();
        registry.register(Box::new(IsDayOffSource::new(
            http.clone(),
            config.isdayoff_url.clone(),
        )));
        registry.register(Box::new(ConsultantSource::new(
            http,
            config.consultant_url.clone(),
            config.consultant_six_day_suffix.clone(),
        )));
        registry.register(Box::new(StubSource));
        Ok(registry)
    }

    /// Ajoute une source ; une source de même nom est remplacée.
    pub fn register(&mut self, source: Box<dyn DaySource>) {
        self.sources.retain(|s| s.name() != source.name());
        self.sources.push(source);
    }

    pub fn get(&self, name: &str) -> Result<&dyn DaySource, SourceError> {
        self.sources
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
            .ok_or_else(|| SourceError::UnknownSource(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn DaySource> {
        self.sources.iter().map(|s| s.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|s| s.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekend_working_day_becomes_transfer() {
        let mut codes = vec![DayCode::OrdinaryWorking; 366];
        promote_transfers(2024, WeekConvention::FiveDay, &mut codes).unwrap();
        // 2024-01-06 samedi, 2024-01-07 dimanche, 2024-01-08 lundi
        assert_eq!(codes[5], DayCode::ForcedWorking);
        assert_eq!(codes[6], DayCode::ForcedWorking);
        assert_eq!(codes[7], DayCode::OrdinaryWorking);

        let mut codes = vec![DayCode::OrdinaryWorking; 366];
        promote_transfers(2024, WeekConvention::SixDay, &mut codes).unwrap();
        assert_eq!(codes[5], DayCode::OrdinaryWorking);
        assert_eq!(codes[6], DayCode::ForcedWorking);
    }

    #[test]
    fn registry_lookup_and_replace() {
        let mut registry = SourceRegistry::new();
        registry.register(Box::new(StubSource));
        registry.register(Box::new(StubSource));
        assert_eq!(registry.names(), vec!["stub"]);
        assert!(registry.get("stub").is_ok());
        assert!(matches!(
            registry.get("nope"),
            Err(SourceError::UnknownSource(name)) if name == "nope"
        ));
    }
}
