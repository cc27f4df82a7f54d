//! Configuration model for the Climate API.
//!
//! The configuration is a single YAML document. Every section and field has a
//! default, so an empty file (or no `reference` section at all) still yields a
//! usable configuration pointing at the bundled Hawaii dataset.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

/// Root of the configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClimateConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClimateConfig {
    /// Service name used in logs and the health endpoint.
    pub fn service_name(&self) -> &str {
        if self.service.name.trim().is_empty() {
            DEFAULT_SERVICE_NAME
        } else {
            &self.service.name
        }
    }

    /// Host the HTTP server binds to.
    pub fn bind_host(&self) -> &str {
        if self.server.host.trim().is_empty() {
            DEFAULT_HOST
        } else {
            &self.server.host
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Location of the pre-populated SQLite dataset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Fixed values that two endpoints filter on implicitly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReferenceConfig {
    /// Station code used by `/precipitation` and `/tobs`.
    #[serde(default = "default_reference_station")]
    pub station: String,
    /// `YYYY-MM-DD`; `/tobs` returns observations strictly after one year before this date.
    #[serde(default = "default_reference_date")]
    pub date: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            station: default_reference_station(),
            date: default_reference_date(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub date_validation: DateValidation,
}

/// How start/end path segments of the summary routes are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateValidation {
    /// Parse as `YYYY-MM-DD` and reject malformed input with 400.
    #[default]
    Strict,
    /// Pass the raw segment to the store's string comparison.
    Lexical,
}

impl DateValidation {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateValidation::Strict => "strict",
            DateValidation::Lexical => "lexical",
        }
    }
}

impl fmt::Display for DateValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// One of `pretty`, `json`, `compact`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bundled_config() {
        let yaml = include_str!("../../../config/climate.yaml");
        let config: ClimateConfig = serde_yaml::from_str(yaml).expect("Failed to parse climate.yaml");

        assert_eq!(config.service.name, "climate-api");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.path, "Resources/hawaii.sqlite");
        assert_eq!(config.reference.station, "USC00519281");
        assert_eq!(config.reference.date, "2017-08-18");
        assert_eq!(config.api.date_validation, DateValidation::Strict);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: ClimateConfig = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.reference.station, "USC00519281");
        assert_eq!(config.api.date_validation, DateValidation::Strict);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let yaml = r#"
reference:
  station: "USC00513117"
api:
  date_validation: lexical
"#;
        let config: ClimateConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.reference.station, "USC00513117");
        assert_eq!(config.reference.date, "2017-08-18");
        assert_eq!(config.api.date_validation, DateValidation::Lexical);
    }

    #[test]
    fn test_blank_names_fall_back() {
        let mut config = ClimateConfig::default();
        config.service.name = "  ".to_string();
        config.server.host = String::new();

        assert_eq!(config.service_name(), "climate-api");
        assert_eq!(config.bind_host(), "0.0.0.0");
    }
}
