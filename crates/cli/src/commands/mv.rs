//! mv command - Move all objects between buckets
//!
//! Moves every object from the source bucket into the destination
//! bucket (copy + delete source), reporting per-object outcomes.

use clap::Args;

use bk_core::{ObjectLister, TransferEngine, TransferOutcome};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Move all objects from one bucket to another
#[derive(Args, Debug)]
pub struct MvArgs {
    /// Source bucket
    pub source: String,

    /// Destination bucket
    pub destination: String,
}

#[derive(Debug, Serialize)]
struct MvOutput {
    moved: usize,
    copy_failed: usize,
    delete_failed: usize,
}

/// Execute the mv command
///
/// Unlike the library's batch move, the CLI awaits every per-object
/// transfer so outcomes can be reported before the process exits.
/// Per-object isolation is unchanged: one failure neither aborts nor
/// delays the others.
pub async fn execute(args: MvArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    if args.source.contains('/') || args.destination.contains('/') {
        formatter.error("Expected bucket names, not paths");
        return ExitCode::UsageError;
    }

    let client = match super::connect(&formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let lister = ObjectLister::new(client.clone());
    let engine = TransferEngine::new(client);

    let objects = lister.get_files(&args.source, "").await;

    let transfers = objects
        .iter()
        .map(|object| engine.move_file(object, &args.destination));
    let outcomes = futures::future::join_all(transfers).await;

    let moved = count(&outcomes, TransferOutcome::Deleted);
    let copy_failed = count(&outcomes, TransferOutcome::CopyFailed);
    let delete_failed = count(&outcomes, TransferOutcome::DeleteFailed);

    if formatter.is_json() {
        formatter.json(&MvOutput {
            moved,
            copy_failed,
            delete_failed,
        });
    } else {
        formatter.success(&format!(
            "Moved {moved} objects from \"{}\" to \"{}\"",
            args.source, args.destination
        ));
        if copy_failed > 0 {
            formatter.warning(&format!("{copy_failed} objects could not be copied"));
        }
        if delete_failed > 0 {
            formatter.warning(&format!(
                "{delete_failed} objects were copied but not removed from \"{}\"",
                args.source
            ));
        }
    }

    // Best-effort batch: partial failures are reported, not fatal
    ExitCode::Success
}

fn count(outcomes: &[TransferOutcome], outcome: TransferOutcome) -> usize {
    outcomes.iter().filter(|o| **o == outcome).count()
}
