use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Which store backs the todo cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheBackend {
    /// In-process Moka cache bounded by entry count
    Memory { max_entries: u64 },
    /// Remote Redis reachable at the given URL
    Redis { url: String },
}

pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    pub cache: CacheBackend,
    pub cache_ttl: Duration,
    pub cache_timeout: Duration,
    pub allowed_origins: Vec<String>,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 9999;
    const DEFAULT_UPSTREAM_URL: &str = "https://jsonplaceholder.typicode.com";
    const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 5_000;
    const DEFAULT_CACHE_TTL_SECS: u64 = 300;
    const DEFAULT_CACHE_TIMEOUT_MS: u64 = 500;
    const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let cache = match lookup("TODOS_REDIS_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => CacheBackend::Redis { url },
            None => CacheBackend::Memory {
                max_entries: parse_or(
                    &lookup,
                    "TODOS_CACHE_MAX_ENTRIES",
                    Self::DEFAULT_CACHE_MAX_ENTRIES,
                ),
            },
        };

        Self {
            host: lookup("TODOS_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port: parse_or(&lookup, "TODOS_HTTP_PORT", Self::DEFAULT_HTTP_PORT),
            upstream_url: lookup("TODOS_UPSTREAM_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| Self::DEFAULT_UPSTREAM_URL.to_string()),
            upstream_timeout: Duration::from_millis(parse_or(
                &lookup,
                "TODOS_UPSTREAM_TIMEOUT_MS",
                Self::DEFAULT_UPSTREAM_TIMEOUT_MS,
            )),
            cache,
            cache_ttl: Duration::from_secs(cache_ttl_secs(&lookup)),
            cache_timeout: Duration::from_millis(parse_or(
                &lookup,
                "TODOS_CACHE_TIMEOUT_MS",
                Self::DEFAULT_CACHE_TIMEOUT_MS,
            )),
            allowed_origins: lookup("TODOS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

/// Cache entries need a lifetime of at least one second; zero falls back to
/// the default so every store expires entries the same way.
fn cache_ttl_secs<F>(lookup: &F) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    match parse_or(lookup, "TODOS_CACHE_TTL_SECS", Config::DEFAULT_CACHE_TTL_SECS) {
        0 => {
            warn!(
                "TODOS_CACHE_TTL_SECS must be positive, using default {}",
                Config::DEFAULT_CACHE_TTL_SECS
            );
            Config::DEFAULT_CACHE_TTL_SECS
        }
        secs => secs,
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", name, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.bind_address(), "0.0.0.0:9999");
        assert_eq!(config.upstream_url, "https://jsonplaceholder.typicode.com");
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.cache_timeout, Duration::from_millis(500));
        assert_eq!(config.cache, CacheBackend::Memory { max_entries: 10_000 });
        assert_eq!(config.allowed_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_redis_url_selects_redis_backend() {
        let config = config_from(&[("TODOS_REDIS_URL", "redis://127.0.0.1:6379")]);

        assert_eq!(
            config.cache,
            CacheBackend::Redis {
                url: "redis://127.0.0.1:6379".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = config_from(&[
            ("TODOS_HTTP_PORT", "not-a-port"),
            ("TODOS_CACHE_TTL_SECS", "-5"),
        ]);

        assert_eq!(config.http_port, 9999);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_zero_cache_ttl_falls_back_to_default() {
        let config = config_from(&[("TODOS_CACHE_TTL_SECS", "0")]);

        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TODOS_HOST", "127.0.0.1"),
            ("TODOS_HTTP_PORT", "8081"),
            ("TODOS_UPSTREAM_URL", "http://localhost:3000/"),
            ("TODOS_CACHE_TTL_SECS", "60"),
            ("TODOS_ALLOWED_ORIGINS", "http://a.test, http://b.test"),
        ]);

        assert_eq!(config.bind_address(), "127.0.0.1:8081");
        assert_eq!(config.upstream_url, "http://localhost:3000");
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(
            config.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
