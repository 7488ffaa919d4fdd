// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.

use crate::services::geolocation::Coordinates;
use std::env;
use std::path::PathBuf;

/// Backend used when no base URL is configured (local development).
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8001";

/// Log output format for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Orbitah API base URL, without trailing slash
    pub api_base_url: String,
    /// Path of the durable key/value storage file
    pub storage_path: PathBuf,
    /// Runtime language tag (e.g. "es_ES.UTF-8"), if the environment reports one
    pub runtime_language: Option<String>,
    /// Fixed position used instead of a geolocation service
    pub geo_position: Option<Coordinates>,
    /// HTTP geolocation endpoint returning `latitude`/`longitude`
    pub geolocation_url: Option<String>,
    /// GeoJSON file replacing the built-in language regions
    pub locale_regions_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_path: PathBuf::from("orbitah-storage.json"),
            runtime_language: None,
            geo_position: None,
            geolocation_url: None,
            locale_regions_path: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_base_url = env_var("ORBITAH_API_BASE_URL")
            .or_else(|| env_var("VITE_API_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let storage_path = match env_var("ORBITAH_STORAGE_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_storage_path()?,
        };

        let geo_position = env_var("ORBITAH_GEO_POSITION")
            .map(|raw| parse_position(&raw))
            .transpose()?;

        let log_format = match env_var("ORBITAH_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "ORBITAH_LOG_FORMAT",
                    reason: format!("expected 'json' or 'pretty', got '{other}'"),
                })
            }
        };

        Ok(Self {
            api_base_url: normalize_base_url(&api_base_url)?,
            storage_path,
            runtime_language: runtime_language(),
            geo_position,
            geolocation_url: env_var("ORBITAH_GEOLOCATION_URL"),
            locale_regions_path: env_var("ORBITAH_LOCALE_REGIONS").map(PathBuf::from),
            log_format,
        })
    }
}

/// Read a variable, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Runtime language in POSIX precedence order. `C`/`POSIX` carry no language.
fn runtime_language() -> Option<String> {
    ["ORBITAH_LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(env_var)
        .find(|v| v != "C" && v != "POSIX")
}

fn default_storage_path() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|dir| dir.join("orbitah").join("storage.json"))
        .ok_or(ConfigError::Missing("ORBITAH_STORAGE_PATH"))
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            name: "ORBITAH_API_BASE_URL",
            reason: format!("'{raw}' is not an http(s) URL"),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Parse `lat,lng`.
fn parse_position(raw: &str) -> Result<Coordinates, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: "ORBITAH_GEO_POSITION",
        reason,
    };

    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| invalid(format!("expected 'lat,lng', got '{raw}'")))?;
    let latitude: f64 = lat
        .trim()
        .parse()
        .map_err(|_| invalid(format!("bad latitude '{lat}'")))?;
    let longitude: f64 = lng
        .trim()
        .parse()
        .map_err(|_| invalid(format!("bad longitude '{lng}'")))?;

    Coordinates::new(latitude, longitude).ok_or_else(|| invalid(format!("'{raw}' is out of range")))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
