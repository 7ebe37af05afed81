//! bk - Bucket utilities CLI
//!
//! A command-line interface for bucket-to-bucket transfer, listing and
//! export-file utilities over S3-compatible object storage services.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod exit_code;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(log_filter(cli.debug))
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}

/// Build the log filter from the environment and the --debug flag
fn log_filter(debug: bool) -> EnvFilter {
    filter_from(debug, std::env::var(EnvFilter::DEFAULT_ENV).ok())
}

// RUST_LOG always wins; --debug only raises the default level
fn filter_from(debug: bool, directives: Option<String>) -> EnvFilter {
    match directives {
        Some(directives) if !directives.is_empty() => EnvFilter::new(directives),
        _ if debug => EnvFilter::new("debug"),
        _ => EnvFilter::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flag_sets_default_level() {
        assert_eq!(filter_from(true, None).to_string(), "debug");
    }

    #[test]
    fn test_env_directives_win_over_debug_flag() {
        assert_eq!(
            filter_from(true, Some("warn".to_string())).to_string(),
            "warn"
        );
    }

    #[test]
    fn test_no_flag_no_env_is_default_filter() {
        assert_eq!(
            filter_from(false, None).to_string(),
            EnvFilter::default().to_string()
        );
    }
}
