use camara_core::booking::rules::{
    DEFAULT_CLOSING_HOUR, DEFAULT_MAX_DURATION_MINS, DEFAULT_MAX_LEAD_DAYS,
    DEFAULT_MIN_DURATION_MINS, DEFAULT_OPENING_HOUR,
};
use camara_core::booking::BookingRules;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT verification settings.
    pub jwt: JwtConfig,
    /// Operating hours, duration bounds and booking horizon.
    pub booking: BookingRules,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// Booking rules are read by [`booking_rules_from_lookup`].
    ///
    /// # Panics
    ///
    /// Panics on any malformed value so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let booking = booking_rules_from_lookup(|key| std::env::var(key).ok())
            .unwrap_or_else(|e| panic!("Invalid booking configuration: {e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            booking,
        }
    }
}

/// Build [`BookingRules`] from a key lookup (the process environment in
/// production, a map in tests).
///
/// | Env Var                     | Default |
/// |-----------------------------|---------|
/// | `BOOKING_TIMEZONE`          | `UTC`   |
/// | `BOOKING_OPENING_HOUR`      | `8`     |
/// | `BOOKING_CLOSING_HOUR`      | `22`    |
/// | `BOOKING_MIN_DURATION_MINS` | `60`    |
/// | `BOOKING_MAX_DURATION_MINS` | `480`   |
/// | `BOOKING_MAX_LEAD_DAYS`     | `180`   |
pub fn booking_rules_from_lookup<F>(lookup: F) -> Result<BookingRules, String>
where
    F: Fn(&str) -> Option<String>,
{
    let timezone = match lookup("BOOKING_TIMEZONE") {
        Some(name) => BookingRules::parse_timezone(&name)?,
        None => chrono_tz::Tz::UTC,
    };

    BookingRules::new(
        timezone,
        parse_or(&lookup, "BOOKING_OPENING_HOUR", DEFAULT_OPENING_HOUR)?,
        parse_or(&lookup, "BOOKING_CLOSING_HOUR", DEFAULT_CLOSING_HOUR)?,
        parse_or(&lookup, "BOOKING_MIN_DURATION_MINS", DEFAULT_MIN_DURATION_MINS)?,
        parse_or(&lookup, "BOOKING_MAX_DURATION_MINS", DEFAULT_MAX_DURATION_MINS)?,
        parse_or(&lookup, "BOOKING_MAX_LEAD_DAYS", DEFAULT_MAX_LEAD_DAYS)?,
    )
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("{key} must be a valid number, got '{raw}': {e}")),
        None => Ok(default),
    }
}
