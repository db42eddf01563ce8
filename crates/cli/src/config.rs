//! Logging and error-tracking settings for the CLI.
//!
//! # Environment Variables
//!
//! - `SHOPFRONT_LOG_JSON` - Emit JSON log lines when set (any value but `0`/`false`)
//! - `SENTRY_DSN` - Enables Sentry when present
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Event sample rate, 0.0 to 1.0 (default 1.0)

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// Telemetry settings read at startup.
#[derive(Clone, Default)]
pub struct TelemetryConfig {
    pub log_json: bool,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
}

impl std::fmt::Debug for TelemetryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryConfig")
            .field("log_json", &self.log_json)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .field("sentry_sample_rate", &self.sentry_sample_rate)
            .finish()
    }
}

impl TelemetryConfig {
    /// Load from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `SENTRY_SAMPLE_RATE` is not a number in `0.0..=1.0`.
    pub fn from_env() -> Result<Self, TelemetryConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `SENTRY_SAMPLE_RATE` is not a number in `0.0..=1.0`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TelemetryConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_json = lookup("SHOPFRONT_LOG_JSON")
            .is_some_and(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "" | "0" | "false"));

        let sentry_sample_rate = match lookup("SENTRY_SAMPLE_RATE") {
            Some(raw) => {
                let rate: f32 = raw
                    .parse()
                    .map_err(|_| TelemetryConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE", raw.clone()))?;
                if !(0.0..=1.0).contains(&rate) {
                    return Err(TelemetryConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE", raw));
                }
                rate
            }
            None => 1.0,
        };

        Ok(Self {
            log_json,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
            sentry_sample_rate,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<TelemetryConfig, TelemetryConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        TelemetryConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert!(!config.log_json);
        assert!(config.sentry_dsn.is_none());
        assert!((config.sentry_sample_rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_log_json_flag() {
        assert!(load(&[("SHOPFRONT_LOG_JSON", "1")]).unwrap().log_json);
        assert!(load(&[("SHOPFRONT_LOG_JSON", "true")]).unwrap().log_json);
        assert!(!load(&[("SHOPFRONT_LOG_JSON", "false")]).unwrap().log_json);
        assert!(!load(&[("SHOPFRONT_LOG_JSON", "0")]).unwrap().log_json);
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        assert!(load(&[("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
        assert!(load(&[("SENTRY_SAMPLE_RATE", "often")]).is_err());
        let config = load(&[("SENTRY_SAMPLE_RATE", "0.25")]).unwrap();
        assert!((config.sentry_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_debug_redacts_dsn() {
        let config = load(&[("SENTRY_DSN", "https://key@sentry.example/1")]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("key@"));
        assert!(debug.contains("[REDACTED]"));
    }
}
