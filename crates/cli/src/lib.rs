use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "climate-api")]
#[command(about = "Climate API - read-only HTTP queries over a station observation dataset")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API with the given configuration
    Start {
        /// Path to the configuration file
        #[arg(short, long, env = "CLIMATE_CONFIG", default_value = "config/climate.yaml")]
        config: PathBuf,

        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the HTTP port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration without starting the server
    Validate {
        /// Path to the configuration file
        #[arg(short, long, env = "CLIMATE_CONFIG", default_value = "config/climate.yaml")]
        config: PathBuf,
    },

    /// Initialize a new configuration file with all defaults
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = "climate.yaml")]
        output: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
