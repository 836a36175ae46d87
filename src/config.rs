use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::report::{ColumnLayout, NumericPolicy, ParseOptions};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseConfig,
    pub columns: ColumnsConfig,
    pub discovery: DiscoveryConfig,
    pub presets: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    pub on_invalid_number: NumericPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    pub virtual_memory: usize,
    pub cpu_percent: usize,
    pub process_name: usize,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        let layout = ColumnLayout::default();
        ColumnsConfig {
            virtual_memory: layout.virtual_memory,
            cpu_percent: layout.cpu_percent,
            process_name: layout.process_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Regex matched against the whole file name.
    pub file_pattern: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            file_pattern: crate::discover::DEFAULT_FILE_PATTERN.to_string(),
        }
    }
}

impl Config {
    pub fn layout(&self) -> ColumnLayout {
        ColumnLayout {
            virtual_memory: self.columns.virtual_memory,
            cpu_percent: self.columns.cpu_percent,
            process_name: self.columns.process_name,
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            layout: self.layout(),
            numeric_policy: self.parse.on_invalid_number,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("topcsv").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Config::default()
        }),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "config not readable, using defaults");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.parse.on_invalid_number, NumericPolicy::Abort);
        assert_eq!(config.layout(), ColumnLayout::default());
        assert_eq!(config.discovery.file_pattern, r"top\.log(\.[0-9])?");
        assert!(config.presets.is_empty());
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[columns]
process_name = 12
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.columns.process_name, 12);
        // Other fields should be defaults
        assert_eq!(config.columns.virtual_memory, 4);
        assert_eq!(config.parse.on_invalid_number, NumericPolicy::Abort);
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[parse]
on_invalid_number = "skip"

[columns]
virtual_memory = 3
cpu_percent = 6
process_name = 7

[discovery]
file_pattern = 'top-.*\.txt'

[presets]
web = ["nginx", "php-fpm"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let options = config.parse_options();
        assert_eq!(options.numeric_policy, NumericPolicy::Skip);
        assert_eq!(options.layout.virtual_memory, 3);
        assert_eq!(options.layout.cpu_percent, 6);
        assert_eq!(options.layout.process_name, 7);
        assert_eq!(config.discovery.file_pattern, r"top-.*\.txt");
        assert_eq!(config.presets["web"], vec!["nginx", "php-fpm"]);
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.columns.process_name, 11);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&path);
        assert_eq!(config.columns.process_name, 11);
    }
}
