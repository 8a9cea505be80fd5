// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::api::DEFAULT_DATASET_URL;
use crate::renderer::DEFAULT_TITLE;

pub const DATASET_URL_ENV: &str = "HEATMAP_DATASET_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset_url: String,
    pub output_path: PathBuf,
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            output_path: PathBuf::from("output/global_temperature_heatmap.svg"),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

fn get_config_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("config.toml");
    path
}

pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    let config_str = fs::read_to_string(path)?;
    let config = toml::from_str(&config_str)?;
    Ok(config)
}

/// Read `config.toml`, falling back to defaults, then apply environment overrides.
pub fn load_config() -> Config {
    let config_path = get_config_path();
    let mut config = match load_config_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            warn!(
                "Using default configuration, could not load {:?}: {}",
                config_path, e
            );
            Config::default()
        }
    };

    if let Ok(url) = env::var(DATASET_URL_ENV) {
        config.dataset_url = url;
    }
    config
}

pub fn save_config(config: &Config, path: &Path) -> anyhow::Result<()> {
    let config_str = toml::to_string_pretty(config)?;
    fs::write(path, config_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default_points_at_reference_dataset() {
        let config = Config::default();
        assert!(config.dataset_url.ends_with("global-temperature.json"));
        assert_eq!(config.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_config_deserialization_from_toml_string() {
        let toml_content = r#"
dataset_url = "http://localhost:8080/temps.json"
output_path = "out/chart.svg"
title = "Land temperatures"
"#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.dataset_url, "http://localhost:8080/temps.json");
        assert_eq!(config.output_path, PathBuf::from("out/chart.svg"));
        assert_eq!(config.title, "Land temperatures");
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config =
            toml::from_str(r#"title = "Only a title""#).expect("Failed to parse TOML");
        assert_eq!(config.title, "Only a title");
        assert_eq!(config.dataset_url, DEFAULT_DATASET_URL);
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let result: Result<Config, _> = toml::from_str("title = [\"unterminated\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load_config_to_temp_file() {
        let config = Config {
            dataset_url: "http://example.test/data.json".to_string(),
            output_path: PathBuf::from("chart.svg"),
            title: "Temp".to_string(),
        };

        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        save_config(&config, temp_file.path()).expect("Failed to save");

        let loaded = load_config_from(temp_file.path()).expect("Failed to load");
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_config_from_written_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"output_path = \"custom.svg\"\n")
            .unwrap();
        let loaded = load_config_from(temp_file.path()).unwrap();
        assert_eq!(loaded.output_path, PathBuf::from("custom.svg"));
    }
}
