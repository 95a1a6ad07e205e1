//! Runtime configuration read from the environment.
//!
//! `HOST` (default 0.0.0.0), `PORT` (default 8080), `DEFAULT_QUALIFIERS` (default 4).
//! Unparseable values fall back to the default with a warning.

use crate::logic::DEFAULT_QUALIFIERS;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Qualifiers taken into the knockout stage when a request does not specify.
    pub default_qualifiers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_qualifiers: DEFAULT_QUALIFIERS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);
        let port = parse_or("PORT", lookup("PORT"), defaults.port);
        let qualifiers = parse_or(
            "DEFAULT_QUALIFIERS",
            lookup("DEFAULT_QUALIFIERS"),
            defaults.default_qualifiers,
        );
        let default_qualifiers = match qualifiers {
            n if n < 2 => {
                log::warn!("DEFAULT_QUALIFIERS must be at least 2, using {}", DEFAULT_QUALIFIERS);
                DEFAULT_QUALIFIERS
            }
            n => n,
        };
        Self {
            host,
            port,
            default_qualifiers,
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}
