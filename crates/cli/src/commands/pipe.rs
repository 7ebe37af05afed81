//! pipe command - Write stdin as a JSON object
//!
//! Reads stdin, validates it as JSON and writes it to storage tagged
//! with the application/json content type.

use std::io::Read;

use clap::Args;

use bk_core::{parse_bucket_path, DocumentWriter};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Write stdin as a JSON object
#[derive(Args, Debug)]
pub struct PipeArgs {
    /// Destination path (bucket/key)
    pub target: String,
}

/// Execute the pipe command
pub async fn execute(args: PipeArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let (bucket, key) = match parse_bucket_path(&args.target) {
        Ok(parsed) => parsed,
        Err(e) => {
            formatter.error(&format!("Invalid path: {e}"));
            return ExitCode::UsageError;
        }
    };

    if key.is_empty() {
        formatter.error("Object key is required for pipe command.");
        return ExitCode::UsageError;
    }

    // Read from stdin
    let mut buffer = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
        formatter.error(&format!("Failed to read from stdin: {e}"));
        return ExitCode::GeneralError;
    }

    let body: serde_json::Value = match serde_json::from_str(&buffer) {
        Ok(body) => body,
        Err(e) => {
            formatter.error(&format!("Input is not valid JSON: {e}"));
            return ExitCode::UsageError;
        }
    };

    let client = match super::connect(&formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let writer = DocumentWriter::new(client);

    if writer.write_json(&bucket, &key, &body).await {
        formatter.success(&format!("Wrote {bucket}/{key}"));
        ExitCode::Success
    } else {
        formatter.error(&format!("Failed to write {bucket}/{key}"));
        ExitCode::NetworkError
    }
}
