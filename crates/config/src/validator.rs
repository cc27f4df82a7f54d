use crate::*;
use chrono::NaiveDate;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Reference station is required")]
    MissingReferenceStation,

    #[error("Invalid reference date '{0}'. Must be in format YYYY-MM-DD (e.g., 2017-08-18)")]
    InvalidReferenceDate(String),

    #[error("Database path is required")]
    MissingDatabasePath,

    #[error("{field} must be a positive integer")]
    InvalidPositiveInteger { field: String },

    #[error("Server port cannot be 0")]
    InvalidPort,

    #[error("Invalid log format '{0}'. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("Environment variable placeholder left unresolved in {field}: {value}")]
    UnresolvedEnvVar { field: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            defaults_applied: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_config(config: &ClimateConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_service(config, &mut report);
    validate_server(&config.server, &mut report);
    validate_database(&config.database, &mut report);
    validate_reference(&config.reference, &mut report);
    validate_api(&config.api, &mut report);
    validate_logging(&config.logging, &mut report);

    report
}

fn validate_service(config: &ClimateConfig, report: &mut ValidationReport) {
    if config.service.name.trim().is_empty() {
        report.add_default("service.name", DEFAULT_SERVICE_NAME);
    }
}

fn validate_server(server: &ServerSettings, report: &mut ValidationReport) {
    if server.host.trim().is_empty() {
        report.add_default("server.host", DEFAULT_HOST);
    }

    if server.port == 0 {
        report.add_error(ValidationError::InvalidPort);
    } else if server.port < 1024 {
        report.add_warning(
            "server.port",
            &format!("Port {} is privileged and may require elevated permissions", server.port),
        );
    }
}

fn validate_database(database: &DatabaseConfig, report: &mut ValidationReport) {
    if database.path.trim().is_empty() {
        report.add_error(ValidationError::MissingDatabasePath);
    } else if has_unresolved_env_vars(&database.path) {
        report.add_error(ValidationError::UnresolvedEnvVar {
            field: "database.path".to_string(),
            value: database.path.clone(),
        });
    } else if !Path::new(&database.path).exists() {
        report.add_warning(
            "database.path",
            &format!("Dataset file '{}' does not exist yet", database.path),
        );
    }

    if database.max_connections == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "database.max_connections".to_string(),
        });
    }
}

fn validate_reference(reference: &ReferenceConfig, report: &mut ValidationReport) {
    if reference.station.trim().is_empty() {
        report.add_error(ValidationError::MissingReferenceStation);
    } else if has_unresolved_env_vars(&reference.station) {
        report.add_error(ValidationError::UnresolvedEnvVar {
            field: "reference.station".to_string(),
            value: reference.station.clone(),
        });
    }

    if NaiveDate::parse_from_str(&reference.date, "%Y-%m-%d").is_err() {
        report.add_error(ValidationError::InvalidReferenceDate(reference.date.clone()));
    }
}

fn validate_api(api: &ApiConfig, report: &mut ValidationReport) {
    if api.date_validation == DateValidation::Lexical {
        report.add_warning(
            "api.date_validation",
            "Lexical mode passes malformed dates to the store unchecked; results may be empty or misleading",
        );
    }
}

fn validate_logging(logging: &LoggingConfig, report: &mut ValidationReport) {
    let valid_formats = ["pretty", "json", "compact"];
    if !valid_formats.contains(&logging.format.to_lowercase().as_str()) {
        report.add_error(ValidationError::InvalidLogFormat(logging.format.clone()));
    }
}
