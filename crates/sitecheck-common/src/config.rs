//! Configuration management for Sitecheck components

use serde::{Deserialize, Serialize};
use sitecheck_core::{AuditConfig, Error, Result};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Audit scope toggles
    #[serde(default)]
    pub audit: AuditConfig,

    /// Scanner settings
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Merge with environment variables (SITECHECK_ prefix)
    pub fn merge_env(mut self) -> Self {
        if let Ok(val) = std::env::var("SITECHECK_AUDIT_LINKS") {
            self.audit.audit_links = val != "0" && val != "false";
        }
        if let Ok(val) = std::env::var("SITECHECK_AUDIT_FORMS") {
            self.audit.audit_forms = val != "0" && val != "false";
        }
        if let Ok(val) = std::env::var("SITECHECK_AUDIT_COOKIES") {
            self.audit.audit_cookies = val != "0" && val != "false";
        }
        if let Ok(val) = std::env::var("SITECHECK_AUDIT_HEADERS") {
            self.audit.audit_headers = val != "0" && val != "false";
        }
        if let Ok(val) = std::env::var("SITECHECK_NO_STORE") {
            self.scanner.no_store = val == "1" || val == "true";
        }
        if let Ok(val) = std::env::var("SITECHECK_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("SITECHECK_LOG_FORMAT") {
            self.logging.format = val;
        }
        self
    }
}

/// Scanner settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Disable storing issues in the registry (hooks still fire)
    #[serde(default)]
    pub no_store: bool,
}

/// Logging settings as they appear in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level
    #[serde(default = "default_level")]
    pub level: String,
    /// Format name: pretty, json or compact
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    String::from("info")
}

fn default_format() -> String {
    String::from("pretty")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.audit.audit_links);
        assert!(!config.scanner.no_store);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml(
            r#"
            [audit]
            audit_links = false

            [scanner]
            no_store = true

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert!(!config.audit.audit_links);
        assert!(config.audit.audit_forms);
        assert!(config.scanner.no_store);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = Config::from_toml("audit = not valid").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitecheck.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"[audit]\naudit_cookies = false\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(!config.audit.audit_cookies);

        assert!(Config::from_file(dir.path().join("missing.toml")).is_err());
    }
}
