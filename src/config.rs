use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Paramètres d'accès aux sources distantes.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Nouvelles tentatives après la première requête.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    #[serde(default = "default_isdayoff_url")]
    pub isdayoff_url: String,
    #[serde(default = "default_consultant_url")]
    pub consultant_url: String,
    /// Segment d'URL ajouté après l'année pour la semaine de 6 jours.
    #[serde(default = "default_consultant_six_day_suffix")]
    pub consultant_six_day_suffix: String,
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_max_retries() -> u32 {
    2
}
fn default_retry_backoff_ms() -> u64 {
    500
}
fn default_isdayoff_url() -> String {
    "https://isdayoff.ru".to_string()
}
fn default_consultant_url() -> String {
    "https://www.consultant.ru/law/ref/calendar/proizvodstvennye".to_string()
}
fn default_consultant_six_day_suffix() -> String {
    "6".to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            isdayoff_url: default_isdayoff_url(),
            consultant_url: default_consultant_url(),
            consultant_six_day_suffix: default_consultant_six_day_suffix(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Charge une configuration JSON ; les champs absents prennent leur valeur par défaut.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
        let config: FetchConfig = serde_json::from_slice(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}
