//! Resource guard CLI
//!
//! One-shot monitoring and optimization runs against the configured backends.
//! Meant for cron jobs and operators; the server does not need to be running.

use anyhow::Context;
use clap::{Parser, Subcommand};
use resource_guard::monitoring::ResourceAlert;
use resource_guard::server::builder::load_config;
use resource_guard::storage::evict_pattern;
use resource_guard::utils::config::ConfigUtils;
use resource_guard::utils::format_bytes;
use resource_guard::utils::logging::init_tracing;
use resource_guard::{AppState, Config, ResourceStats, Status, StatusReport};
use std::process::ExitCode;
use tracing::info;

/// Operations above this count trigger database maintenance without `--force`
const MAINTENANCE_HIGH_MEMORY_OPERATIONS: u64 = 10;

#[derive(Parser)]
#[command(name = "guard-cli", version, about = "Resource guard monitoring and optimization")]
struct Cli {
    /// Configuration file; defaults to config/guard.yaml
    #[arg(short, long, global = true, env = "GUARD_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate every check and print a report
    Monitor {
        /// Emit a structured alert record when the status is not ok
        #[arg(long)]
        alert: bool,
    },
    /// Evict stale entries, reclaim memory and optionally run database maintenance
    Optimize {
        /// Run database maintenance regardless of recent memory pressure
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    ConfigUtils::load_dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config: Config = load_config(cli.config.as_deref())
        .await
        .context("loading configuration")?;
    init_tracing(&config.guard.logging);

    let state = AppState::new(&config)
        .await
        .context("connecting resource guard backends")?;

    match cli.command {
        Command::Monitor { alert } => monitor(&state, alert).await,
        Command::Optimize { force } => optimize(&state, force).await,
    }
}

async fn monitor(state: &AppState, alert: bool) -> anyhow::Result<ExitCode> {
    println!("Resource monitoring");
    println!();

    let report = state.guard.evaluate("cli").await;
    print_checks(&report);
    println!();
    print_stats("Statistics", &report.statistics);
    println!();

    match report.status {
        Status::Error => {
            println!("Critical issues detected:");
            for check in report.checks_with(Status::Error) {
                println!("  - {}: {}", check.name, check.message);
            }

            if state.config.emergency.auto_cleanup {
                println!();
                println!("Running emergency cleanup...");
                let outcome = state.guard.emergency_cleanup().await;
                println!(
                    "  {} (memory {} -> {})",
                    outcome.message,
                    format_bytes(outcome.memory_usage_before as f64),
                    format_bytes(outcome.memory_usage_after as f64)
                );
            }
        }
        Status::Warning => {
            println!("Warnings:");
            for check in report.checks_with(Status::Warning) {
                println!("  - {}: {}", check.name, check.message);
            }
            println!();
            println!("Recommendations:");
            println!("  - Reduce concurrent operations");
            println!("  - Process large imports in smaller chunks");
            println!("  - Run `guard-cli optimize` to clear stale entries");
        }
        Status::Ok => println!("All checks passed"),
    }

    if alert {
        if let Some(alert) = ResourceAlert::from_report(&report) {
            alert.emit();
        }
    }

    Ok(match report.status {
        Status::Error => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

async fn optimize(state: &AppState, force: bool) -> anyhow::Result<ExitCode> {
    println!("Resource optimization");
    println!();

    let removed = state
        .reporter
        .cleanup_old_entries()
        .await
        .context("evicting stale entries")?;
    println!("Evicted {} stale entries", removed);

    let stats = state
        .reporter
        .statistics(state.reporter.retention_hours())
        .await
        .context("reading statistics")?;
    print_stats("Statistics", &stats);
    println!();

    let memory = state.guard.memory();
    let before = memory.snapshot().usage;
    memory.reclaim();

    let cache = &state.config.cache;
    let mut evicted = 0;
    for pattern in &cache.pressure_patterns {
        evicted += evict_pattern(state.store.as_ref(), pattern, cache.pattern_eviction)
            .await
            .with_context(|| format!("evicting {}", pattern))?;
    }
    println!(
        "Reclaimed memory ({} -> {}), evicted {} cached entries",
        format_bytes(before as f64),
        format_bytes(memory.snapshot().usage as f64),
        evicted
    );

    if force || stats.high_memory_operations > MAINTENANCE_HIGH_MEMORY_OPERATIONS {
        println!("Running database maintenance...");
        let ran = state
            .guard
            .database()
            .run_maintenance()
            .await
            .context("running database maintenance")?;
        info!(statements = ran, "Database maintenance completed");
        println!("  {} maintenance statements executed", ran);
    }

    println!();
    println!("Optimization completed");
    Ok(ExitCode::SUCCESS)
}

fn print_checks(report: &StatusReport) {
    println!("Overall status: {}", report.status.as_str().to_uppercase());
    for check in report.checks.values() {
        println!(
            "  [{:<7}] {:<13} {}",
            check.status.as_str(),
            check.name,
            check.message
        );
    }
}

fn print_stats(title: &str, stats: &ResourceStats) {
    println!("{}", title);
    println!("  {:<24} {:>12}", "Metric", "Value");
    println!("  {:<24} {:>12}", "Total operations", stats.total_operations);
    println!(
        "  {:<24} {:>12}",
        "High memory operations", stats.high_memory_operations
    );
    println!(
        "  {:<24} {:>12}",
        "Average memory usage",
        format_bytes(stats.average_memory_usage)
    );
    println!(
        "  {:<24} {:>12}",
        "Peak memory usage",
        format_bytes(stats.peak_memory_usage as f64)
    );
}
