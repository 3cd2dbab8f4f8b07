// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use chrono::{FixedOffset, Local, Offset, Utc};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which event store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Google Cloud Firestore (or the emulator if `FIRESTORE_EMULATOR_HOST` is set)
    Firestore,
    /// Process-local store, lost on restart. For local development.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(Self::Firestore),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid("STORE_BACKEND", s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL (allowed CORS origin)
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Event store backend
    pub store_backend: StoreBackend,
    /// Firestore collection holding activity documents
    pub activities_collection: String,
    /// How often a subscription re-queries the store for changes made elsewhere
    pub snapshot_poll_interval: Duration,
    /// How often a live view recomputes its elapsed-time displays
    pub elapsed_refresh_interval: Duration,
    /// Time zone used for day headers, time labels and manual entry
    pub display_offset: FixedOffset,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self::test_default()
    }
}

impl Config {
    /// Config for tests: in-memory store, UTC display, short poll interval.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            store_backend: StoreBackend::Memory,
            activities_collection: crate::db::collections::ACTIVITIES.to_string(),
            snapshot_poll_interval: Duration::from_secs(1),
            elapsed_refresh_interval: Duration::from_secs(60),
            display_offset: Utc.fix(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Every setting has a default, so an empty environment yields a
    /// Firestore-backed server on port 8080 in the host's local time zone.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let display_offset = match env::var("DISPLAY_UTC_OFFSET_MINUTES") {
            Ok(raw) => parse_offset_minutes(&raw)?,
            Err(_) => Local::now().offset().fix(),
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: parse_var("PORT", 8080)?,
            store_backend: env::var("STORE_BACKEND")
                .map(|v| v.parse())
                .unwrap_or(Ok(StoreBackend::Firestore))?,
            activities_collection: env::var("ACTIVITIES_COLLECTION")
                .unwrap_or_else(|_| crate::db::collections::ACTIVITIES.to_string()),
            snapshot_poll_interval: Duration::from_secs(parse_var("SNAPSHOT_POLL_SECS", 5)?),
            elapsed_refresh_interval: Duration::from_secs(parse_var("ELAPSED_REFRESH_SECS", 60)?),
            display_offset,
        })
    }
}

/// Read a numeric variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

fn parse_offset_minutes(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = || ConfigError::Invalid("DISPLAY_UTC_OFFSET_MINUTES", raw.to_string());
    let minutes: i32 = raw.trim().parse().map_err(|_| invalid())?;
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(invalid)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
