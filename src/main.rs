use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use task_deck::{config::DEFAULT_BASE_URL, shell::Shell, Config};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "task-deck", about = "Terminal client for a remote to-do list")]
struct Args {
    /// Backend origin serving /api/tasks
    #[arg(long, env = "TASKS_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "TASKS_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// How long notifications stay active, in milliseconds
    #[arg(long, env = "TASKS_NOTICE_MS", default_value_t = 2000)]
    notice_ms: u64,

    /// Show an error when the background list refresh fails
    #[arg(long, env = "TASKS_REPORT_REFRESH_FAILURES")]
    report_refresh_failures: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logs go to stderr, the screen owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config {
        base_url: args.base_url,
        request_timeout: Duration::from_secs(args.timeout_secs),
        notice_ttl: Duration::from_millis(args.notice_ms),
        report_refresh_failures: args.report_refresh_failures,
    };
    tracing::info!(base_url = %config.base_url, "starting task client");

    Shell::new(config)?.run().await
}
