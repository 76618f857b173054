//! resource-guard server
//!
//! Serves the guard, statistics and guarded application routes

#![allow(missing_docs)]

use clap::Parser;
use resource_guard::server::builder::{load_config, run_server};
use resource_guard::utils::config::ConfigUtils;
use resource_guard::utils::logging::init_tracing;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "guard-server", version, about = "Resource guard HTTP server")]
struct Args {
    /// Configuration file; defaults to config/guard.yaml
    #[arg(short, long, env = "GUARD_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    ConfigUtils::load_dotenv();
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.guard.logging);

    match run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps multi-line validation errors readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
