//! config command - Manage storage connection settings
//!
//! Stores and shows the endpoint, credentials and region used to build
//! the storage client.

use clap::{Args, Subcommand};

use bk_core::{ConfigManager, Settings};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Set storage connection settings
    Set(SetArgs),

    /// Show current settings (secret key redacted)
    Show,
}

/// Arguments for config set
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Endpoint URL (e.g. http://localhost:9000)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Access key ID
    #[arg(long)]
    pub access_key: Option<String>,

    /// Secret access key
    #[arg(long)]
    pub secret_key: Option<String>,

    /// Region
    #[arg(long)]
    pub region: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long)]
    pub path_style: bool,
}

/// Execute the config command
pub async fn execute(cmd: ConfigCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let manager = match ConfigManager::new() {
        Ok(m) => m,
        Err(e) => {
            formatter.error(&format!("Failed to locate configuration: {e}"));
            return ExitCode::GeneralError;
        }
    };

    match cmd {
        ConfigCommands::Set(args) => set(&manager, args, &formatter),
        ConfigCommands::Show => show(&manager, &formatter),
    }
}

fn set(manager: &ConfigManager, args: SetArgs, formatter: &Formatter) -> ExitCode {
    let mut config = match manager.load() {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    if let Some(endpoint) = args.endpoint {
        config.settings.endpoint = Some(endpoint);
    }
    if let Some(access_key) = args.access_key {
        config.settings.access_key = Some(access_key);
    }
    if let Some(secret_key) = args.secret_key {
        config.settings.secret_key = Some(secret_key);
    }
    if let Some(region) = args.region {
        config.settings.region = region;
    }
    if args.path_style {
        config.settings.force_path_style = true;
    }

    if let Err(e) = config.settings.validate() {
        formatter.error(&format!("Invalid settings: {e}"));
        return ExitCode::UsageError;
    }

    match manager.save(&config) {
        Ok(()) => {
            formatter.success("Configuration saved");
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to save configuration: {e}"));
            ExitCode::from_error(&e)
        }
    }
}

fn show(manager: &ConfigManager, formatter: &Formatter) -> ExitCode {
    let config = match manager.load() {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let redacted = Settings {
        secret_key: config.settings.secret_key.as_ref().map(|_| "***".to_string()),
        ..config.settings
    };

    if formatter.is_json() {
        formatter.json(&redacted);
    } else {
        formatter.println(&format!(
            "endpoint:   {}",
            redacted.endpoint.as_deref().unwrap_or("(default)")
        ));
        formatter.println(&format!(
            "access_key: {}",
            redacted.access_key.as_deref().unwrap_or("(none)")
        ));
        formatter.println(&format!(
            "secret_key: {}",
            redacted.secret_key.as_deref().unwrap_or("(none)")
        ));
        formatter.println(&format!("region:     {}", redacted.region));
        formatter.println(&format!("path_style: {}", redacted.force_path_style));
    }

    ExitCode::Success
}
