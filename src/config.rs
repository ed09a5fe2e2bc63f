// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::api::DEFAULT_BASE_URL;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
    pub db_url: String,
    /// Persisted cache entries older than this are refetched. Absent means
    /// no expiry.
    pub cache_max_age_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        // Try to read from config.toml first
        if let Ok(config) = load_config() {
            return config;
        }

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            db_url: "sqlite://fxconvert.db".to_string(),
            cache_max_age_secs: None,
        }
    }
}

fn get_config_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("config.toml");
    path
}

pub fn load_config() -> anyhow::Result<Config> {
    let config_path = get_config_path();
    let config_str = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

/// Environment beats config.toml, which beats the defaults.
pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(base_url) = env::var("FXCONVERT_BASE_URL") {
        config.base_url = base_url;
    }
    if let Ok(db_url) = env::var("FXCONVERT_DB_URL") {
        config.db_url = db_url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            db_url: "sqlite://fxconvert.db".to_string(),
            cache_max_age_secs: None,
        };
        assert_eq!(config.base_url, "https://api.vatcomply.com/");
        assert!(config.cache_max_age_secs.is_none());
    }

    #[test]
    fn test_parse_config_toml() {
        let config: Config = toml::from_str(
            r#"
            base_url = "https://rates.example.test/"
            db_url = "sqlite://custom.db"
            cache_max_age_secs = 86400
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://rates.example.test/");
        assert_eq!(config.db_url, "sqlite://custom.db");
        assert_eq!(config.cache_max_age_secs, Some(86400));
    }
}
