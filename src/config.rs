//! Configuration for the photogrid client.
//!
//! Settings are loaded from TOML. Lookup order:
//!
//! 1. `--config <PATH>` (must exist)
//! 2. `photogrid.toml` in the current directory
//! 3. `<config dir>/photogrid/config.toml`
//! 4. built-in defaults
//!
//! `PHOTOGRID_BASE_URL` and `--base-url` override `service.base_url`, in
//! that order. There is no built-in service location.
//!
//! ```toml
//! [service]
//! base_url = "https://photos.example.com"
//! timeout_secs = 30
//!
//! [histogram]
//! include_year = false
//! chart_width = 30
//!
//! [grid]
//! columns = 3
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::constants;
use crate::histogram::Granularity;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Root configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub service: ServiceConfig,
    pub histogram: HistogramConfig,
    pub grid: GridConfig,
    pub logging: LoggingConfig,

    /// File the settings were read from; `None` for built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Remote photo service settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    /// Per-request timeout. Unset means requests may hang indefinitely.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistogramConfig {
    /// Key buckets by month and year instead of month only.
    pub include_year: bool,
    pub chart_width: usize,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            include_year: false,
            chart_width: constants::DEFAULT_CHART_WIDTH,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub columns: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: constants::DEFAULT_GRID_COLUMNS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "info").
    pub level: Option<String>,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Config {
    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - Fields have invalid types or are unknown
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.source = Some(path.to_path_buf());

        Ok(config)
    }

    /// Find and load the config file, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path is missing or any found file is invalid.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::candidate_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(constants::CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(
                dir.join(constants::APP_DIR)
                    .join(constants::USER_CONFIG_FILE),
            );
        }
        paths
    }

    /// Apply the environment and command-line overrides for the base URL.
    pub fn apply_overrides(&mut self, base_url_flag: Option<&str>) {
        if let Ok(url) = std::env::var(constants::ENV_BASE_URL)
            && !url.trim().is_empty()
        {
            self.service.base_url = Some(url);
        }
        if let Some(url) = base_url_flag {
            self.service.base_url = Some(url.to_string());
        }
    }

    /// The configured service location.
    ///
    /// # Errors
    ///
    /// Returns an error with setup hints if no base URL is configured.
    pub fn base_url(&self) -> Result<&str> {
        self.service
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .with_context(|| {
                format!(
                    "No photo service configured.\n\n\
                     Set one of:\n  \
                     - --base-url https://photos.example.com\n  \
                     - {} environment variable\n  \
                     - [service] base_url in {}",
                    constants::ENV_BASE_URL,
                    constants::CONFIG_FILE_NAME
                )
            })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.service.timeout_secs.map(Duration::from_secs)
    }

    pub fn granularity(&self) -> Granularity {
        if self.histogram.include_year {
            Granularity::MonthYear
        } else {
            Granularity::Month
        }
    }

    /// Validate configuration with comprehensive checks.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails with one or more errors:
    /// - Missing, empty or unparsable base URL, or a non-http(s) scheme
    /// - Zero timeout, chart width or grid columns
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // 1. Service location
        match self.base_url() {
            Err(_) => errors.push("service.base_url is not set".to_string()),
            Ok(raw) => match Url::parse(raw) {
                Err(e) => errors.push(format!("service.base_url '{raw}' is not a valid URL: {e}")),
                Ok(url) if !matches!(url.scheme(), "http" | "https") => errors.push(format!(
                    "service.base_url must use http or https (got: '{}')",
                    url.scheme()
                )),
                Ok(url) => {
                    let local = matches!(
                        url.host_str(),
                        Some("localhost" | "127.0.0.1" | "[::1]")
                    );
                    if url.scheme() == "http" && !local {
                        warnings.push(format!(
                            "service.base_url uses plain http for a remote host: {raw}\n  \
                             Uploads will travel unencrypted; prefer https"
                        ));
                    }
                },
            },
        }

        // 2. Timeout
        if self.service.timeout_secs == Some(0) {
            errors.push(
                "service.timeout_secs cannot be 0. Remove it to wait indefinitely".to_string(),
            );
        }

        // 3. Rendering
        if self.histogram.chart_width == 0 {
            errors.push("histogram.chart_width cannot be 0".to_string());
        }
        if self.grid.columns == 0 {
            errors.push("grid.columns cannot be 0".to_string());
        }
        if self.grid.columns > 12 {
            warnings.push(format!(
                "grid.columns {} is very wide; rows may wrap in narrow terminals",
                self.grid.columns
            ));
        }

        if !errors.is_empty() {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }

        Ok(ValidationResult { warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_url(url: &str) -> Config {
        let mut config = Config::default();
        config.service.base_url = Some(url.to_string());
        config
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.service.base_url.is_none());
        assert!(config.service.timeout_secs.is_none());
        assert!(!config.histogram.include_year);
        assert_eq!(config.histogram.chart_width, constants::DEFAULT_CHART_WIDTH);
        assert_eq!(config.grid.columns, constants::DEFAULT_GRID_COLUMNS);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.granularity(), Granularity::Month);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
[service]
base_url = "https://photos.example.com"
timeout_secs = 15

[histogram]
include_year = true
chart_width = 40

[grid]
columns = 4

[logging]
level = "debug"
format = "json"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_url().unwrap(), "https://photos.example.com");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.granularity(), Granularity::MonthYear);
        assert_eq!(config.histogram.chart_width, 40);
        assert_eq!(config.grid.columns, 4);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = toml::from_str::<Config>("[service]\nbase_ulr = \"http://x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_base_url_has_hint() {
        let err = Config::default().base_url().unwrap_err().to_string();
        assert!(err.contains("No photo service configured"));

        let err = Config::default().validate().unwrap_err().to_string();
        assert!(err.contains("service.base_url is not set"));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let err = with_url("not a url").validate().unwrap_err().to_string();
        assert!(err.contains("not a valid URL"));

        let err = with_url("ftp://photos.example.com")
            .validate()
            .unwrap_err()
            .to_string();
        assert!(err.contains("http or https"));
    }

    #[test]
    fn test_validate_warns_on_remote_http() {
        let result = with_url("http://photos.example.com").validate().unwrap();
        assert!(result.has_warnings());
        assert!(result.warnings[0].contains("plain http"));

        let result = with_url("http://localhost:8080").validate().unwrap();
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_validate_multiple_errors() {
        let toml_str = r#"
[service]
timeout_secs = 0

[histogram]
chart_width = 0

[grid]
columns = 0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("base_url"));
        assert!(err.contains("timeout_secs"));
        assert!(err.contains("chart_width"));
        assert!(err.contains("columns"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photogrid.toml");
        fs::write(&path, "[service]\nbase_url = \"http://127.0.0.1:3000\"\n").unwrap();

        let config = Config::discover(Some(&path)).unwrap();
        assert_eq!(config.base_url().unwrap(), "http://127.0.0.1:3000");
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_defaults_have_no_source() {
        let config: Config = toml::from_str("[grid]\ncolumns = 2\n").unwrap();
        assert!(config.source.is_none());
        assert!(Config::default().source.is_none());
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::discover(Some(&dir.path().join("nope.toml")))
            .unwrap_err()
            .to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_from_invalid_toml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[service\n").unwrap();

        let err = Config::load_from(&path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    #[serial]
    fn test_overrides_precedence() {
        let mut config = with_url("http://from-file");

        // SAFETY: serial test, no other thread reads the environment concurrently
        unsafe { std::env::set_var(constants::ENV_BASE_URL, "http://from-env") };
        config.apply_overrides(None);
        assert_eq!(config.base_url().unwrap(), "http://from-env");

        config.apply_overrides(Some("http://from-flag"));
        assert_eq!(config.base_url().unwrap(), "http://from-flag");

        unsafe { std::env::remove_var(constants::ENV_BASE_URL) };
    }

    #[test]
    #[serial]
    fn test_blank_env_is_ignored() {
        let mut config = with_url("http://from-file");

        // SAFETY: serial test, no other thread reads the environment concurrently
        unsafe { std::env::set_var(constants::ENV_BASE_URL, "  ") };
        config.apply_overrides(None);
        assert_eq!(config.base_url().unwrap(), "http://from-file");

        unsafe { std::env::remove_var(constants::ENV_BASE_URL) };
    }
}
