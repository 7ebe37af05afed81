//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use bk_core::{ConfigManager, StorageClient};
use bk_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod config;
mod get;
mod group;
mod ls;
mod mv;
mod pipe;

/// bk - Bucket utilities for S3-compatible object storage
///
/// Bucket-to-bucket transfer, file and folder listing, export-file
/// grouping and JSON document writing.
#[derive(Parser, Debug)]
#[command(name = "bk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage storage connection settings
    #[command(subcommand)]
    Config(config::ConfigCommands),

    /// List files or virtual folders in a bucket
    Ls(ls::LsArgs),

    /// Move all objects from one bucket to another
    Mv(mv::MvArgs),

    /// Group JSON export files by table name
    Group(group::GroupArgs),

    /// Write stdin as a JSON object
    Pipe(pipe::PipeArgs),

    /// Download objects to a local directory
    Get(get::GetArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Config(cmd) => config::execute(cmd, output_config).await,
        Commands::Ls(args) => ls::execute(args, output_config).await,
        Commands::Mv(args) => mv::execute(args, output_config).await,
        Commands::Group(args) => group::execute(args, output_config).await,
        Commands::Pipe(args) => pipe::execute(args, output_config).await,
        Commands::Get(args) => get::execute(args, output_config).await,
    }
}

/// Build a storage client from the stored configuration
///
/// Shared by every command that talks to the storage service.
pub(crate) async fn connect(formatter: &Formatter) -> Result<Arc<dyn StorageClient>, ExitCode> {
    let manager = match ConfigManager::new() {
        Ok(m) => m,
        Err(e) => {
            formatter.error(&format!("Failed to locate configuration: {e}"));
            return Err(ExitCode::GeneralError);
        }
    };

    let config = match manager.load() {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return Err(ExitCode::from_error(&e));
        }
    };

    match S3Client::new(config.settings).await {
        Ok(client) => Ok(Arc::new(client)),
        Err(e) => {
            formatter.error(&format!("Failed to create storage client: {e}"));
            Err(ExitCode::from_error(&e))
        }
    }
}
