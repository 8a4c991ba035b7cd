//! Configuration loading and representation.
//!
//! Everything comes from `PRICEBOOK_*` environment variables with sensible
//! defaults; [`Config::from_lookup`] takes any key lookup so tests do not touch
//! the process environment.

use thiserror::Error;

use pricebook_observability::{LogConfig, LogFormat};
use pricebook_pricing::Locale;

use crate::jobs::Schedule;

pub const ENV_LOCALE: &str = "PRICEBOOK_LOCALE";
pub const ENV_LOG_LEVEL: &str = "PRICEBOOK_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "PRICEBOOK_LOG_FORMAT";
pub const ENV_DAILY_JOB_SCHEDULE: &str = "PRICEBOOK_DAILY_JOB_SCHEDULE";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid value for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub reason: String,
}

impl ConfigError {
    fn new(key: &'static str, reason: impl ToString) -> Self {
        Self {
            key,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Locale for labels and dates on rendered surfaces.
    pub locale: Locale,
    pub log: LogConfig,
    /// When the daily price-set job fires.
    pub daily_job_schedule: Schedule,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            log: LogConfig::default(),
            daily_job_schedule: Schedule::daily_at_midnight(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a key lookup; missing or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let locale = match get(ENV_LOCALE) {
            Some(raw) => raw
                .parse::<Locale>()
                .map_err(|e| ConfigError::new(ENV_LOCALE, e))?,
            None => defaults.locale,
        };

        let level = get(ENV_LOG_LEVEL).unwrap_or(defaults.log.level);

        let format = match get(ENV_LOG_FORMAT) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::new(ENV_LOG_FORMAT, e))?,
            None => defaults.log.format,
        };

        let daily_job_schedule = match get(ENV_DAILY_JOB_SCHEDULE) {
            Some(raw) => Schedule::parse(&raw).map_err(|e| ConfigError::new(ENV_DAILY_JOB_SCHEDULE, e))?,
            None => defaults.daily_job_schedule,
        };

        Ok(Self {
            locale,
            log: LogConfig { level, format },
            daily_job_schedule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::DAILY_JOB_SCHEDULE;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.format, LogFormat::Text);
        assert_eq!(config.daily_job_schedule.to_string(), DAILY_JOB_SCHEDULE);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            (ENV_LOCALE, "ru-RU"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_FORMAT, "json"),
            (ENV_DAILY_JOB_SCHEDULE, "30 6 * * *"),
        ]))
        .unwrap();

        assert_eq!(config.locale, Locale::Ru);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.daily_job_schedule.to_string(), "30 6 * * *");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[(ENV_LOCALE, "  ")])).unwrap();
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn invalid_values_name_the_key() {
        let err = Config::from_lookup(lookup(&[(ENV_LOCALE, "klingon")])).unwrap_err();
        assert_eq!(err.key, ENV_LOCALE);

        let err = Config::from_lookup(lookup(&[(ENV_LOG_FORMAT, "xml")])).unwrap_err();
        assert_eq!(err.key, ENV_LOG_FORMAT);

        let err = Config::from_lookup(lookup(&[(ENV_DAILY_JOB_SCHEDULE, "*/5 * * * *")])).unwrap_err();
        assert_eq!(err.key, ENV_DAILY_JOB_SCHEDULE);
    }
}
