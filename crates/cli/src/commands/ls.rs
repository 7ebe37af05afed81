//! ls command - List files and virtual folders
//!
//! Lists object names under a bucket and optional prefix, or the
//! virtual folders derived from the backend's common prefixes.

use clap::Args;

use bk_core::{parse_bucket_path, ObjectLister};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List files or virtual folders
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Remote path (bucket[/prefix])
    pub path: String,

    /// List virtual folders instead of files
    #[arg(long)]
    pub folders: bool,
}

/// Output structure for ls command (JSON format)
#[derive(Debug, Serialize)]
struct LsOutput {
    items: Vec<String>,
}

/// Execute the ls command
pub async fn execute(args: LsArgs, output_config: OutputConfig) -> ExitCode {
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

    let items = if args.folders {
        lister.list_folders(&bucket, &prefix).await
    } else {
        lister.list_files(&bucket, &prefix).await
    };

    if formatter.is_json() {
        formatter.json(&LsOutput { items });
    } else {
        for item in &items {
            formatter.println(item);
        }
    }

    // Listing is best-effort: failures degrade to an empty result
    ExitCode::Success
}
