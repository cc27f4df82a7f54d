//! Climate API CLI and Server Binary
//!
//! Entry point for the Climate API. Provides commands for initializing and
//! validating a configuration file and for starting the HTTP server.

use anyhow::{Context, Result};
use climate::{climate_routes, ClimateApiState, ClimateService, ClimateStore, SqliteClimateStore};
use cli::{Cli, Commands};
use config::{
    generate_default_config, load_config, save_config, validate_config, ClimateConfig,
};
use observability::{init_logging, LogFormat};
use server::{health_routes, validate_port_available, HealthState, HttpServer, ServerConfig, ServerExt};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Start { config, host, port } => start_api(config, host, port).await,
        Commands::Validate { config } => {
            init_logging("climate-api", LogFormat::Pretty)?;
            info!("Executing 'validate' command");
            validate_command(config).await
        }
        Commands::Init { output } => {
            init_logging("climate-api", LogFormat::Pretty)?;
            info!("Executing 'init' command");
            init_command(output).await
        }
    }
}

async fn start_api<P: AsRef<Path>>(
    config_path: P,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    let config_path = config_path.as_ref();

    // Load config before logging so the configured format applies
    let config = load_config(config_path)?;
    let log_format = LogFormat::parse(&config.logging.format).unwrap_or_default();
    init_logging(config.service_name(), log_format)?;

    info!(path = ?config_path, "Executing 'start' command");

    let report = validate_config(&config);

    if !report.warnings.is_empty() {
        warn!("Configuration warnings:");
        for warning in &report.warnings {
            warn!(field = %warning.field, message = %warning.message);
        }
    }

    for default in &report.defaults_applied {
        debug!(field = %default.field, value = %default.value, "Default applied");
    }

    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot start API due to configuration errors");
    }

    let server_config = ServerConfig::new(
        host_override.unwrap_or_else(|| config.bind_host().to_string()),
        port_override.unwrap_or(config.server.port),
    );

    serve(&config, server_config).await
}

async fn serve(config: &ClimateConfig, server_config: ServerConfig) -> Result<()> {
    let store = SqliteClimateStore::open(&config.database.path, config.database.max_connections)
        .await
        .with_context(|| format!("Failed to open dataset at {}", config.database.path))?;

    let station_count = store
        .station_count()
        .await
        .context("Failed to read station table")?;
    info!(station_count, "Dataset ready");

    let service = ClimateService::new(
        Arc::new(store.clone()),
        &config.reference,
        config.api.date_validation,
    )
    .context("Invalid reference configuration")?;
    let date_validation = service.date_validation();

    let api_state = Arc::new(ClimateApiState::new(Arc::new(service)));
    let health_state = Arc::new(HealthState::new(config.service_name()));

    let router = climate_routes(api_state).merge(health_routes(health_state));

    validate_port_available(&server_config).await?;

    info!(
        service = config.service_name(),
        address = %server_config.bind_address(),
        date_validation = %date_validation,
        "Starting Climate API"
    );

    // Serve until Ctrl+C / SIGTERM, then drain in-flight requests
    let result = HttpServer::new(server_config, router).run_with_ctrl_c().await;

    store.close().await;
    info!("Climate API stopped");

    result.map_err(Into::into)
}

async fn validate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    info!(path = ?config_path.as_ref(), "Validating configuration");

    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            anyhow::bail!(e);
        }
    };

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Service: {}", config.service_name());
    println!("Listen: {}:{}", config.bind_host(), config.server.port);
    println!("Dataset: {}", config.database.path);
    println!("Reference station: {}", config.reference.station);
    println!("Reference date: {}", config.reference.date);
    println!("Date validation: {}", config.api.date_validation);

    Ok(())
}

async fn init_command<P: AsRef<Path>>(output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!(?output_path, "Initializing new configuration file");

    let config = generate_default_config();
    save_config(&config, output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("This configuration includes:");
    println!("  - HTTP listener on {}:{}", config.server.host, config.server.port);
    println!("  - Dataset path {}", config.database.path);
    println!(
        "  - Reference station {} and reference date {}",
        config.reference.station, config.reference.date
    );
    println!();
    println!("Next steps:");
    println!("  1. Point database.path at the climate SQLite dataset");
    println!(
        "  2. Run 'climate-api validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'climate-api start --config {:?}' to start the API",
        output_path
    );

    Ok(())
}
