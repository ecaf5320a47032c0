//! Process configuration from environment variables.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/library.sqlite";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_COVER_LOOKUP_URL: &str = "https://www.googleapis.com/books/v1";

/// Settings for the external cover service and the cache/breaker in front of it.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverConfig {
    pub enabled: bool,
    pub base_url: String,
    pub timeout: Duration,
    pub cache_capacity: NonZeroUsize,
    pub cache_ttl: Duration,
    pub breaker_threshold: NonZeroUsize,
    pub breaker_cooldown: Duration,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_COVER_LOOKUP_URL.to_string(),
            timeout: Duration::from_millis(3000),
            cache_capacity: NonZeroUsize::new(512).unwrap_or(NonZeroUsize::MIN),
            cache_ttl: Duration::from_secs(3600),
            breaker_threshold: NonZeroUsize::new(5).unwrap_or(NonZeroUsize::MIN),
            breaker_cooldown: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// When set, registering a second author with an identical name is rejected.
    pub reject_duplicate_author_names: bool,
    pub cover: CoverConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            reject_duplicate_author_names: false,
            cover: CoverConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment. Call `dotenvy::dotenv()` first to honor `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unset or blank keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = CoverConfig::default();

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_addr = parse_or("BIND_ADDR", get("BIND_ADDR"), SocketAddr::from_str, || {
            DEFAULT_BIND_ADDR.parse().map_err(|_| ConfigError::Load("default bind address".into()))
        })?;
        let reject_duplicate_author_names =
            parse_bool("REJECT_DUPLICATE_AUTHOR_NAMES", get("REJECT_DUPLICATE_AUTHOR_NAMES"), false)?;

        let cover = CoverConfig {
            enabled: parse_bool("COVER_LOOKUP_ENABLED", get("COVER_LOOKUP_ENABLED"), defaults.enabled)?,
            base_url: get("COVER_LOOKUP_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout: parse_millis("COVER_LOOKUP_TIMEOUT_MS", get("COVER_LOOKUP_TIMEOUT_MS"), defaults.timeout)?,
            cache_capacity: parse_non_zero("COVER_CACHE_CAPACITY", get("COVER_CACHE_CAPACITY"), defaults.cache_capacity)?,
            cache_ttl: parse_secs("COVER_CACHE_TTL_SECS", get("COVER_CACHE_TTL_SECS"), defaults.cache_ttl)?,
            breaker_threshold: parse_non_zero(
                "COVER_BREAKER_THRESHOLD",
                get("COVER_BREAKER_THRESHOLD"),
                defaults.breaker_threshold,
            )?,
            breaker_cooldown: parse_secs(
                "COVER_BREAKER_COOLDOWN_SECS",
                get("COVER_BREAKER_COOLDOWN_SECS"),
                defaults.breaker_cooldown,
            )?,
        };

        Ok(AppConfig {
            database_url,
            bind_addr,
            reject_duplicate_author_names,
            cover,
        })
    }
}

fn parse_or<T, E, P, D>(key: &'static str, raw: Option<String>, parse: P, default: D) -> Result<T, ConfigError>
where
    P: Fn(&str) -> Result<T, E>,
    D: FnOnce() -> Result<T, ConfigError>,
{
    match raw {
        Some(v) => parse(&v).map_err(|_| ConfigError::Invalid { key, value: v }),
        None => default(),
    }
}

fn parse_bool(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(v) = raw else {
        return Ok(default);
    };
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: v }),
    }
}

fn parse_millis(key: &'static str, raw: Option<String>, default: Duration) -> Result<Duration, ConfigError> {
    parse_or(key, raw, |s| s.parse::<u64>().map(Duration::from_millis), || Ok(default))
}

fn parse_secs(key: &'static str, raw: Option<String>, default: Duration) -> Result<Duration, ConfigError> {
    parse_or(key, raw, |s| s.parse::<u64>().map(Duration::from_secs), || Ok(default))
}

fn parse_non_zero(
    key: &'static str,
    raw: Option<String>,
    default: NonZeroUsize,
) -> Result<NonZeroUsize, ConfigError> {
    parse_or(key, raw, |s| s.parse::<NonZeroUsize>(), || Ok(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn reads_every_variable() {
        let cfg = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("REJECT_DUPLICATE_AUTHOR_NAMES", "yes"),
            ("COVER_LOOKUP_ENABLED", "off"),
            ("COVER_LOOKUP_URL", "http://localhost:9000/books/"),
            ("COVER_LOOKUP_TIMEOUT_MS", "250"),
            ("COVER_CACHE_CAPACITY", "8"),
            ("COVER_CACHE_TTL_SECS", "60"),
            ("COVER_BREAKER_THRESHOLD", "2"),
            ("COVER_BREAKER_COOLDOWN_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert!(cfg.reject_duplicate_author_names);
        assert!(!cfg.cover.enabled);
        assert_eq!(cfg.cover.base_url, "http://localhost:9000/books");
        assert_eq!(cfg.cover.timeout, Duration::from_millis(250));
        assert_eq!(cfg.cover.cache_capacity.get(), 8);
        assert_eq!(cfg.cover.cache_ttl, Duration::from_secs(60));
        assert_eq!(cfg.cover.breaker_threshold.get(), 2);
        assert_eq!(cfg.cover.breaker_cooldown, Duration::from_secs(5));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config_from(&[("DATABASE_URL", "   "), ("COVER_CACHE_TTL_SECS", "")]).unwrap();
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.cover.cache_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn rejects_zero_capacity_and_bad_flags() {
        let err = config_from(&[("COVER_CACHE_CAPACITY", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "COVER_CACHE_CAPACITY", .. }));

        let err = config_from(&[("REJECT_DUPLICATE_AUTHOR_NAMES", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "REJECT_DUPLICATE_AUTHOR_NAMES", .. }));

        let err = config_from(&[("BIND_ADDR", "not-an-addr")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BIND_ADDR", .. }));
    }
}
