//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with
//! defaults, plus the typed configuration structs built from them.

use chrono::FixedOffset;

/// Get an environment variable with a default value
pub fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable, parsing to a specific type
///
/// Returns the default if the variable is unset or fails to parse.
pub fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Database URL
///
/// Defaults to a SQLite file under the local data directory.
pub fn database_url() -> String {
    env_or("LINKWATCH_DATABASE_URL", "sqlite:data/linkwatch.db")
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl ServerConfig {
    /// Load the server configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env_or("LINKWATCH_HOST", "0.0.0.0"),
            port: env_parse("LINKWATCH_PORT", 3001),
        }
    }

    /// Socket address string for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Scan schedule configuration
///
/// The hourly scan is anchored to wall-clock hours in a configured zone,
/// expressed as a fixed UTC offset in minutes so that half-hour zones
/// (e.g. +05:30 = 330) anchor correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// UTC offset of the schedule zone, in minutes
    pub utc_offset_minutes: i32,
}

impl ScheduleConfig {
    /// Load the schedule configuration from environment variables.
    pub fn from_env() -> Self {
        Self::with_offset_minutes(env_parse("LINKWATCH_SCHEDULE_UTC_OFFSET_MINUTES", 0i32))
    }

    /// Build a config from an explicit offset.
    ///
    /// Out-of-range offsets fall back to UTC with a warning.
    pub fn with_offset_minutes(minutes: i32) -> Self {
        if minutes.abs() >= 24 * 60 {
            tracing::warn!(minutes, "UTC offset out of range, falling back to UTC");
            return Self {
                utc_offset_minutes: 0,
            };
        }
        Self {
            utc_offset_minutes: minutes,
        }
    }

    /// The schedule zone as a fixed offset.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("UTC offset is valid"))
    }
}
