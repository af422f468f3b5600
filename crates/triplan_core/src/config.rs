//! Process configuration from environment variables.
//!
//! # Responsibility
//! - Resolve the calendar path, policies, logging setup and API credential.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - The API key is never exposed through `Debug` or logs.

use crate::calendar::default_calendar_path;
use crate::logging::default_log_level;
use crate::model::event::WindowPolicy;
use crate::service::itinerary_service::FlushPolicy;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_CALENDAR_PATH: &str = "TRIPLAN_CALENDAR_PATH";
pub const ENV_LOG_LEVEL: &str = "TRIPLAN_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TRIPLAN_LOG_DIR";
pub const ENV_WINDOW_POLICY: &str = "TRIPLAN_WINDOW_POLICY";
pub const ENV_FLUSH_POLICY: &str = "TRIPLAN_FLUSH_POLICY";

const DEFAULT_LOG_DIR_NAME: &str = "triplan-logs";

/// Model provider credential.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "{key}=`{value}` is invalid; expected {expected}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: Option<ApiKey>,
    pub calendar_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub window_policy: WindowPolicy,
    pub flush_policy: FlushPolicy,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let window_policy = match get(ENV_WINDOW_POLICY) {
            Some(raw) => WindowPolicy::parse(&raw).ok_or(ConfigError::InvalidValue {
                key: ENV_WINDOW_POLICY,
                value: raw,
                expected: "strict|lenient",
            })?,
            None => WindowPolicy::default(),
        };
        let flush_policy = match get(ENV_FLUSH_POLICY) {
            Some(raw) => FlushPolicy::parse(&raw).ok_or(ConfigError::InvalidValue {
                key: ENV_FLUSH_POLICY,
                value: raw,
                expected: "every_insert|on_finish",
            })?,
            None => FlushPolicy::default(),
        };

        Ok(Self {
            api_key: get(ENV_API_KEY).map(ApiKey::new),
            calendar_path: get(ENV_CALENDAR_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(default_calendar_path),
            log_level: get(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: get(ENV_LOG_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)),
            window_policy,
            flush_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup_from(&[])).expect("empty env is valid");
        assert_eq!(config.api_key, None);
        assert_eq!(config.calendar_path, default_calendar_path());
        assert!(config.calendar_path.ends_with("trip_events.ics"));
        assert_eq!(config.window_policy, WindowPolicy::Strict);
        assert_eq!(config.flush_policy, FlushPolicy::EveryInsert);
        assert_eq!(config.log_level, default_log_level());
        assert!(config.log_dir.is_absolute());
    }

    #[test]
    fn overrides_are_trimmed_and_blank_values_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, " sk-test "),
            (ENV_CALENDAR_PATH, "  /tmp/custom.ics "),
            (ENV_WINDOW_POLICY, "Lenient"),
            (ENV_FLUSH_POLICY, "on-finish"),
            (ENV_LOG_LEVEL, "   "),
        ]))
        .expect("overrides should parse");
        assert_eq!(config.api_key.as_ref().map(ApiKey::expose), Some("sk-test"));
        assert_eq!(config.calendar_path, PathBuf::from("/tmp/custom.ics"));
        assert_eq!(config.window_policy, WindowPolicy::Lenient);
        assert_eq!(config.flush_policy, FlushPolicy::OnFinish);
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn rejects_unknown_policy_values() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_WINDOW_POLICY, "sometimes")]))
            .expect_err("unknown policy must fail");
        assert!(err.to_string().contains(ENV_WINDOW_POLICY));
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "sk-secret")]))
            .expect("key should parse");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("ApiKey(***)"));
    }
}
