//!
//! Library for the SSDeep hashing task.
//!
//! Provides the task's record types and the orchestration that turns a list
//! of input file references into one hash artifact per file, reported back as
//! a manifest.
//!
#![warn(missing_docs)]

use std::collections::HashMap;
use std::path::Path;

use log::warn;
use tokio::sync::mpsc::Receiver;

use crate::hashing::{hasher, FuzzyHasher, HashContextBuilder};
use crate::task::{get_input_files, InputFile, OutputFile, TaskResult};

/// Contains the core logic for hashing files: output classification, the
/// hasher interface, and the default `ssdeep`-backed implementation.
///
pub mod hashing;

/// Contains the framework-facing record types: input file references, output
/// artifact records, and the task-result manifest.
///
pub mod task;

/// The command string reported in task results.
///
pub const REPORTED_COMMAND: &str = "ssdeep -s -b";

const NO_INPUT_FILES_MESSAGE: &str = "No input files provided to calculate SSDeep hash.";

/// Run the hash task over a set of input files.
///
/// Every usable input yields exactly one artifact in the output directory,
/// containing either the file's fuzzy hash or the tool's diagnostic text; a
/// file the tool cannot hash never fails the task.
///
/// # Arguments
///
/// * `pipe_result` - The previous task's encoded result, if this task is fed
///     from a pipe; its output files take the place of `input_files`.
/// * `input_files` - The files to hash.
/// * `output_dir` - The directory to write artifacts into.
/// * `workflow_id` - The workflow this task runs under, if any.
///
/// # Returns
///
/// * `Ok(TaskResult)` - The manifest of written artifacts.
/// * `Err(_)` - Only on environment misconfiguration, such as the tool not
///     being installed or the output directory not being writable.
///
pub async fn run_hash_task(
    pipe_result: Option<&str>,
    input_files: Vec<InputFile>,
    output_dir: impl AsRef<Path>,
    workflow_id: Option<String>,
) -> anyhow::Result<TaskResult> {
    let inputs = get_input_files(pipe_result, input_files)?;
    run_with_hasher(hasher(), inputs, output_dir.as_ref(), workflow_id).await
}

pub(crate) async fn run_with_hasher(
    hasher: &dyn FuzzyHasher,
    inputs: Vec<InputFile>,
    output_dir: &Path,
    workflow_id: Option<String>,
) -> anyhow::Result<TaskResult> {
    if inputs.is_empty() {
        let meta = HashMap::from([("message".to_string(), NO_INPUT_FILES_MESSAGE.to_string())]);
        return Ok(task_result(vec![], workflow_id, meta));
    }

    let (output_sink, outputs) = tokio::sync::mpsc::channel(100);
    let ctx = HashContextBuilder::new(output_dir, output_sink)
        .workflow_id(workflow_id.clone())
        .build();

    let collecting = tokio::spawn(collect_outputs(outputs));

    for input in &inputs {
        match input.path.as_deref().filter(|path| !path.is_empty()) {
            Some(_) => hasher.hash(&ctx, input).await?,
            None => warn!("Skipping file entry with no path: {:?}", input),
        }
    }

    // Close the channel so the collector can drain and finish.
    drop(ctx);

    let output_files = collecting.await?;
    if output_files.is_empty() {
        warn!("SSDeep task processed input files but generated no output files");
    }

    Ok(task_result(output_files, workflow_id, HashMap::new()))
}

fn task_result(
    output_files: Vec<OutputFile>,
    workflow_id: Option<String>,
    meta: HashMap<String, String>,
) -> TaskResult {
    TaskResult {
        output_files,
        workflow_id,
        command: REPORTED_COMMAND.to_string(),
        meta,
    }
}

async fn collect_outputs(mut outputs: Receiver<OutputFile>) -> Vec<OutputFile> {
    let mut output_files = vec![];
    while let Some(output) = outputs.recv().await {
        output_files.push(output);
    }
    output_files
}
