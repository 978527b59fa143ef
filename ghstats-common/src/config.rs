use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::metric::Metric;

/// Traffic server connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL that chart form actions are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Initial state of one chart and its query form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart identifier, unique per viewer.
    #[serde(default = "default_chart_id")]
    pub id: String,

    /// Heading shown above the chart.
    #[serde(default = "default_chart_title")]
    pub title: String,

    /// Form action: path (or absolute URL) of the chart data endpoint.
    #[serde(default = "default_action")]
    pub action: String,

    /// Initial `data_metric` field value.
    #[serde(default)]
    pub metric: Metric,

    /// Initial hidden series.
    #[serde(default)]
    pub hidden_series: Vec<String>,

    /// Initial start picker value.
    #[serde(default)]
    pub start_datetime: Option<String>,

    /// Initial end picker value.
    #[serde(default)]
    pub end_datetime: Option<String>,
}

fn default_chart_id() -> String {
    "traffic-chart".to_string()
}

fn default_chart_title() -> String {
    "Repository Traffic".to_string()
}

fn default_action() -> String {
    "/traffic-data/".to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            id: default_chart_id(),
            title: default_chart_title(),
            action: default_action(),
            metric: Metric::default(),
            hidden_series: Vec::new(),
            start_datetime: None,
            end_datetime: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Viewer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Charts to display, in order.
    #[serde(default = "default_charts")]
    pub charts: Vec<ChartConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Serve chart data from the built-in generator instead of the server.
    #[serde(default)]
    pub demo: bool,
}

fn default_charts() -> Vec<ChartConfig> {
    vec![ChartConfig::default()]
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            charts: default_charts(),
            logging: LoggingConfig::default(),
            demo: false,
        }
    }
}

impl ViewerConfig {
    /// Load and validate a viewer configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ViewerConfig = load_config(path)?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            charts = config.charts.len(),
            "Loaded viewer configuration"
        );
        Ok(config)
    }

    /// Check for values the viewer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.trim().is_empty() {
            return Err(Error::Config("server.base_url must not be empty".to_string()));
        }

        if self.server.timeout_secs == 0 {
            return Err(Error::Config(
                "server.timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.charts.is_empty() {
            return Err(Error::Config("at least one chart is required".to_string()));
        }

        let mut seen = HashSet::new();
        for chart in &self.charts {
            if chart.id.trim().is_empty() {
                return Err(Error::Config("chart id must not be empty".to_string()));
            }
            if !seen.insert(chart.id.as_str()) {
                return Err(Error::Config(format!("duplicate chart id: {}", chart.id)));
            }
            if let Some(bad) = chart.hidden_series.iter().find(|s| s.contains(',')) {
                return Err(Error::Config(format!(
                    "hidden series id must not contain ',': {}",
                    bad
                )));
            }
        }

        Ok(())
    }
}

/// Load a configuration file in JSON5 format.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    json5::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Load a configuration from a JSON5 string.
pub fn parse_config<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T> {
    json5::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_viewer_config() {
        let json5 = r#"
        {
            server: {
                base_url: "http://stats.local:8080/",
            },
            charts: [
                {
                    id: "views",
                    action: "/traffic-data/",
                    metric: "uniques",
                    hidden_series: ["nocarryr/old-repo"],
                    start_datetime: "2018-04-01T00:00:00Z",
                },
            ],
            logging: {
                level: "debug",
            },
        }
        "#;

        let config: ViewerConfig = parse_config(json5).unwrap();

        assert_eq!(config.server.base_url, "http://stats.local:8080/");
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.charts.len(), 1);
        assert_eq!(config.charts[0].metric, Metric::Uniques);
        assert_eq!(config.charts[0].hidden_series, vec!["nocarryr/old-repo"]);
        assert_eq!(config.charts[0].title, "Repository Traffic");
        assert!(config.charts[0].end_datetime.is_none());
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config: ViewerConfig = parse_config("{}").unwrap();

        assert_eq!(config.server.base_url, "http://127.0.0.1:8080/");
        assert_eq!(config.charts.len(), 1);
        assert_eq!(config.charts[0].id, "traffic-chart");
        assert_eq!(config.charts[0].metric, Metric::Count);
        assert!(!config.demo);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_json_logging_format() {
        let json5 = r#"{ logging: { level: "debug", format: "json" } }"#;
        let config: ViewerConfig = parse_config(json5).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut config = ViewerConfig::default();
        config.charts.push(ChartConfig::default());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_comma_in_hidden_series() {
        let mut config = ViewerConfig::default();
        config.charts[0].hidden_series = vec!["a,b".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_chart_list() {
        let config = ViewerConfig {
            charts: Vec::new(),
            ..ViewerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
