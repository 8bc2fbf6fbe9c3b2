use super::SourceError;
use crate::config::FetchConfig;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Plafond d'attente entre deux tentatives.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Client HTTP bloquant partagé par les sources distantes.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: Client,
    max_retries: u32,
    backoff: Duration,
}

impl HttpClient {
    pub(crate) fn new(config: &FetchConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SourceError::unavailable("http", e.to_string()))?;
        Ok(Self {
            client,
            max_retries: config.max_retries,
            backoff: config.retry_backoff(),
        })
    }

    /// GET avec reprise exponentielle sur erreur réseau, 429 et 5xx.
    pub(crate) fn get_text(&self, provider: &str, url: &str) -> Result<String, SourceError> {
        let mut attempt = 0u32;
        loop {
            debug!(provider, url, attempt, "GET");
            let reason = match self.client.get(url).send() {
                Ok(resp) if resp.status().is_success() => {
                    return resp
                        .text()
                        .map_err(|e| SourceError::unavailable(provider, e.to_string()));
                }
                Ok(resp) if is_retryable(resp.status()) => format!("HTTP {}", resp.status()),
                Ok(resp) => {
                    return Err(SourceError::unavailable(
                        provider,
                        format!("HTTP {} for {url}", resp.status()),
                    ));
                }
                Err(e) => e.to_string(),
            };

            if attempt >= self.max_retries {
                return Err(SourceError::unavailable(provider, reason));
            }
            let wait = backoff_delay(self.backoff, attempt);
            warn!(
                provider,
                "request failed ({reason}), attempt {}/{}, retrying in {:.1}s",
                attempt + 1,
                self.max_retries + 1,
                wait.as_secs_f64()
            );
            thread::sleep(wait);
            attempt += 1;
        }
    }
}

/// `base * 2^attempt`, plafonné à `MAX_BACKOFF` sans jamais déborder.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    2u32.checked_pow(attempt)
        .and_then(|factor| base.checked_mul(factor))
        .map_or(MAX_BACKOFF, |wait| wait.min(MAX_BACKOFF))
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_policy() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(StatusCode::NOT_FOUND));
        assert!(!is_retryable(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn backoff_doubles_then_saturates() {
        let base = Duration::from_millis(500);
        assert_eq!(backoff_delay(base, 0), base);
        assert_eq!(backoff_delay(base, 1), Duration::from_secs(1));
        assert_eq!(backoff_delay(base, 3), Duration::from_secs(4));
        assert_eq!(backoff_delay(base, 7), MAX_BACKOFF);
        assert_eq!(backoff_delay(Duration::ZERO, 5), Duration::ZERO);
    }

    #[test]
    fn backoff_never_overflows() {
        let base = Duration::from_millis(500);
        assert_eq!(backoff_delay(base, 32), MAX_BACKOFF);
        assert_eq!(backoff_delay(base, u32::MAX), MAX_BACKOFF);
        assert_eq!(backoff_delay(Duration::from_millis(u64::MAX), 0), MAX_BACKOFF);
        assert_eq!(backoff_delay(Duration::from_millis(u64::MAX), 31), MAX_BACKOFF);
    }
}
