//! Kitchen gateway binary

#![allow(missing_docs)]

use clap::Parser;
use kitchen_gateway::utils::logging::{LogFormat, init_tracing};
use kitchen_gateway::{Config, server};
use std::path::PathBuf;
use std::process::ExitCode;

/// HTTP API gateway for the community kitchens platform
#[derive(Debug, Parser)]
#[command(name = "gateway", version, about)]
struct Cli {
    /// YAML configuration file; environment variables only when omitted
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_format) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let config = match Config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
