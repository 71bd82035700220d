use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use temporal_sdk::ActContext;

use hashing::run_hash_task;
use hashing::task::InputFile;

/// Name the activity is registered and routed under.
///
pub const TASK_NAME: &str = "calculate_ssdeep_hash";

/// Metadata describing the activity to the surrounding framework.
///
#[derive(Debug, Clone, Serialize)]
pub struct TaskMetadata {
    /// Name shown for the task in the framework's UI.
    ///
    pub display_name: &'static str,

    /// Description of what the task does.
    ///
    pub description: &'static str,

    /// User-configurable options of the task.
    ///
    pub task_config: Vec<HashMap<String, String>>,
}

/// Returns the registration metadata for the activity.
///
pub fn task_metadata() -> TaskMetadata {
    TaskMetadata {
        display_name: "SSDeep Hash Calculation",
        description: "Calculates the SSDeep (context-triggered piecewise hash) for each \
            input file. Output is a text file per input, containing the hash or an \
            error/notice.",
        // No user-configurable options for basic hashing.
        task_config: vec![],
    }
}

/// Input to the `calculate_ssdeep_hash` activity.
///
#[derive(Debug, Serialize, Deserialize)]
pub struct CalculateSsdeepHashInput {
    /// Encoded result of the previous task, if any; its output files take the
    /// place of `input_files`.
    ///
    #[serde(default)]
    pub pipe_result: Option<String>,

    /// The files to hash.
    ///
    #[serde(default)]
    pub input_files: Vec<InputFile>,

    /// Directory to write the hash artifacts into.
    ///
    pub output_path: String,

    /// The workflow this task runs under, if any.
    ///
    #[serde(default)]
    pub workflow_id: Option<String>,

    /// User configuration for the task; accepted for interface compatibility,
    /// the task has no configurable options.
    ///
    #[serde(default)]
    pub task_config: HashMap<String, serde_json::Value>,
}

/// Output from the `calculate_ssdeep_hash` activity.
///
#[derive(Debug, Serialize, Deserialize)]
pub struct CalculateSsdeepHashOutput {
    /// The encoded task-result manifest.
    ///
    pub task_result: String,
}

/// Activity for calculating the SSDeep hash of each input file.
///
/// Writes one artifact per usable input into `output_path` and returns the
/// encoded manifest of written artifacts.
///
pub async fn calculate_ssdeep_hash(
    _ctx: ActContext,
    input: CalculateSsdeepHashInput,
) -> anyhow::Result<CalculateSsdeepHashOutput> {
    let result = run_hash_task(
        input.pipe_result.as_deref(),
        input.input_files,
        &input.output_path,
        input.workflow_id,
    ).await?;

    Ok(CalculateSsdeepHashOutput {
        task_result: result.encode()?,
    })
}
