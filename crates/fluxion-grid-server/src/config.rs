// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use chrono_tz::Tz;
use serde::Deserialize;

use fluxion_grid_core::{MAX_WINDOW_HOURS, MixProvider, WindowSelector};

const PLACEHOLDER_SECRET: &str = "change-me-to-a-strong-random-secret";
const MAX_LOOKAHEAD_HOURS: u32 = 24 * 31;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub mix: MixSettings,
    #[serde(default)]
    pub window: WindowSettings,
    /// Sample ingestion endpoint; disabled when the section is absent.
    #[serde(default)]
    pub ingest: Option<IngestSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_db_path")]
    pub path: String,
    #[serde(default = "default_sample_retention_days")]
    pub sample_retention_days: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MixSettings {
    #[serde(default = "default_mix_days")]
    pub days: u32,
    /// IANA zone used to cut samples into calendar days.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u32,
    #[serde(default = "default_lookahead_hours")]
    pub lookahead_hours: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestSettings {
    pub shared_secret: String,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    8110
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_db_path() -> String {
    "./data/fluxion-grid.db".to_owned()
}

fn default_sample_retention_days() -> u32 {
    30
}

fn default_mix_days() -> u32 {
    3
}

fn default_timezone() -> String {
    "Europe/Warsaw".to_owned()
}

fn default_interval_minutes() -> u32 {
    15
}

fn default_lookahead_hours() -> u32 {
    48
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            sample_retention_days: default_sample_retention_days(),
        }
    }
}

impl Default for MixSettings {
    fn default() -> Self {
        Self {
            days: default_mix_days(),
            timezone: default_timezone(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            lookahead_hours: default_lookahead_hours(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).with_context(|| "Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.request_timeout_secs == 0 {
            bail!("server.request_timeout_secs must be greater than zero");
        }
        if !(1..=31).contains(&self.mix.days) {
            bail!("mix.days must be between 1 and 31, got {}", self.mix.days);
        }
        self.timezone()?;
        if !(1..=360).contains(&self.window.interval_minutes) {
            bail!(
                "window.interval_minutes must be between 1 and 360, got {}",
                self.window.interval_minutes
            );
        }
        let lookahead = self.window.lookahead_hours;
        if i64::from(lookahead) < MAX_WINDOW_HOURS || lookahead > MAX_LOOKAHEAD_HOURS {
            bail!(
                "window.lookahead_hours must be between {MAX_WINDOW_HOURS} and {MAX_LOOKAHEAD_HOURS}, got {lookahead}"
            );
        }
        if let Some(ingest) = &self.ingest
            && (ingest.shared_secret.is_empty() || ingest.shared_secret == PLACEHOLDER_SECRET)
        {
            bail!("ingest.shared_secret must be set to a strong random value");
        }
        Ok(())
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.mix
            .timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("Invalid mix.timezone '{}': {e}", self.mix.timezone))
    }

    pub fn mix_provider(&self) -> Result<MixProvider> {
        Ok(MixProvider::new(self.mix.days, self.timezone()?))
    }

    #[must_use]
    pub fn window_selector(&self) -> WindowSelector {
        WindowSelector::new(self.window.interval_minutes, self.window.lookahead_hours)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ServerConfig::from_toml_str("").unwrap();

        assert_eq!(config.server.port, 8110);
        assert_eq!(config.server.request_timeout_secs, 5);
        assert_eq!(config.database.sample_retention_days, 30);
        assert_eq!(config.mix.days, 3);
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::Warsaw);
        assert_eq!(config.window.interval_minutes, 15);
        assert_eq!(config.window.lookahead_hours, 48);
        assert!(config.ingest.is_none());
    }

    #[test]
    fn test_full_file_parses() {
        let config = ServerConfig::from_toml_str(
            r#"
            [server]
            bind_address = "127.0.0.1"
            port = 9000
            request_timeout_secs = 2

            [database]
            path = "/var/lib/grid.db"
            sample_retention_days = 7

            [mix]
            days = 7
            timezone = "Europe/London"

            [window]
            interval_minutes = 30
            lookahead_hours = 24

            [ingest]
            shared_secret = "s3cr3t-feed-token"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert_eq!(config.database.path, "/var/lib/grid.db");
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::London);
        assert_eq!(config.window.interval_minutes, 30);
        assert_eq!(config.request_timeout(), Duration::from_secs(2));
        assert_eq!(
            config.ingest.map(|i| i.shared_secret).as_deref(),
            Some("s3cr3t-feed-token")
        );
    }

    #[test]
    fn test_rejects_unknown_timezone() {
        let err = ServerConfig::from_toml_str("[mix]\ntimezone = \"Mars/Olympus\"").unwrap_err();
        assert!(err.to_string().contains("mix.timezone"));
    }

    #[test]
    fn test_rejects_placeholder_secret() {
        let toml = format!("[ingest]\nshared_secret = \"{PLACEHOLDER_SECRET}\"");
        assert!(ServerConfig::from_toml_str(&toml).is_err());
        assert!(ServerConfig::from_toml_str("[ingest]\nshared_secret = \"\"").is_err());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(ServerConfig::from_toml_str("[mix]\ndays = 0").is_err());
        assert!(ServerConfig::from_toml_str("[window]\ninterval_minutes = 0").is_err());
        assert!(ServerConfig::from_toml_str("[window]\nlookahead_hours = 5").is_err());
        assert!(ServerConfig::from_toml_str("[window]\nlookahead_hours = 745").is_err());
        assert!(ServerConfig::from_toml_str("[window]\nlookahead_hours = 4294967295").is_err());
        assert!(ServerConfig::from_toml_str("[window]\nlookahead_hours = 744").is_ok());
        assert!(ServerConfig::from_toml_str("[server]\nrequest_timeout_secs = 0").is_err());
    }
}
