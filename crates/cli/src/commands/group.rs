//! group command - Group JSON export files by table
//!
//! Lists object names under a bucket/prefix and groups the numbered
//! `.json` export files by their table name.

use clap::Args;

use bk_core::{group_json, parse_bucket_path, ObjectLister};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Group JSON export files by table name
#[derive(Args, Debug)]
pub struct GroupArgs {
    /// Remote path (bucket[/prefix])
    pub path: String,
}

/// Execute the group command
pub async fn execute(args: GroupArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let (bucket, prefix) = match parse_bucket_path(&args.path) {
        Ok(parsed) => parsed,
        Err(e) => {
            formatter.error(&format!("Invalid path: {e}"));
            return ExitCode::UsageError;
        }
    };

    let client = match super::connect(&formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let lister = ObjectLister::new(client);
    let names = lister.list_files(&bucket, &prefix).await;
    let grouped = group_json(&names);

    if formatter.is_json() {
        formatter.json(&grouped);
    } else {
        for (table, files) in grouped.iter() {
            formatter.println(&format!("{table} ({} files)", files.len()));
            for file in files {
                formatter.println(&format!("  {file}"));
            }
        }
    }

    ExitCode::Success
}
