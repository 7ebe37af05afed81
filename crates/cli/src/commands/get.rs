//! get command - Download objects
//!
//! Downloads a single object, a folder (prefix) or a whole bucket to a
//! local directory, recreating key paths as folder structure.

use std::path::PathBuf;

use clap::Args;

use bk_core::{parse_bucket_path, Downloader, ObjectHandle};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Download objects to a local directory
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Remote path (bucket[/key-or-prefix])
    pub path: String,

    /// Local target directory
    pub target: PathBuf,

    /// Treat the remote path as a prefix and download everything under it
    #[arg(short, long)]
    pub recursive: bool,
}

#[derive(Debug, Serialize)]
struct GetOutput {
    downloaded: usize,
}

/// Execute the get command
pub async fn execute(args: GetArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let (bucket, key) = match parse_bucket_path(&args.path) {
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

    let downloader = Downloader::new(client);

    let result = if key.is_empty() {
        downloader.download_bucket(&bucket, &args.target).await
    } else if args.recursive || key.ends_with('/') {
        downloader
            .download_folder(&bucket, &key, &args.target)
            .await
    } else {
        let object = ObjectHandle::new(&bucket, &key);
        downloader
            .download_file(&object, &args.target)
            .await
            .map(|_| 1)
    };

    match result {
        Ok(downloaded) => {
            if formatter.is_json() {
                formatter.json(&GetOutput { downloaded });
            } else {
                formatter.success(&format!(
                    "Downloaded {downloaded} objects to \"{}\"",
                    args.target.display()
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Download failed: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
