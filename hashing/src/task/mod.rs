use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback display name for input entries that carry no naming fields.
///
const DEFAULT_DISPLAY_NAME: &str = "input_file";

/// A file reference handed to the task by the framework.
///
/// Entries come from the framework's JSON and may be sparse; only `path` is
/// required for an entry to be hashed, and entries without one are skipped.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFile {
    /// The framework's identifier for the file, if any.
    ///
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Absolute path of the file on shared storage.
    ///
    #[serde(default)]
    pub path: Option<String>,

    /// Human-readable name of the file.
    ///
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Original file name, used when no display name is set.
    ///
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl InputFile {
    /// Creates an input file reference from a bare path.
    ///
    pub fn from_path(path: impl Into<String>) -> Self {
        InputFile {
            path: Some(path.into()),
            ..InputFile::default()
        }
    }

    /// The name to show for this file: the display name, falling back to the
    /// file name, then to a fixed placeholder.
    ///
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.filename.as_deref())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    /// The final component of the file's path, used to name the artifact
    /// written for it. Falls back to the display name when the path has no
    /// usable file name.
    ///
    pub fn original_filename(&self) -> String {
        self.path
            .as_deref()
            .and_then(|path| Path::new(path).file_name())
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.display_name().to_string())
    }
}

impl From<OutputFile> for InputFile {
    fn from(output: OutputFile) -> Self {
        InputFile {
            id: Some(output.id),
            path: Some(output.path),
            display_name: Some(output.display_name),
            filename: None,
        }
    }
}

/// The record for one artifact generated by the task.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    /// Generated identifier for the artifact.
    ///
    pub id: String,

    /// Path of the written artifact.
    ///
    pub path: String,

    /// Human-readable name for the artifact.
    ///
    pub display_name: String,

    /// MIME type of the artifact's content.
    ///
    pub data_type: String,
}

/// Creates the record for an artifact written to `path`.
///
pub fn create_output_file(
    path: impl AsRef<Path>,
    display_name: impl Into<String>,
    data_type: impl Into<String>,
) -> OutputFile {
    OutputFile {
        id: Uuid::new_v4().to_string(),
        path: path.as_ref().to_string_lossy().to_string(),
        display_name: display_name.into(),
        data_type: data_type.into(),
    }
}

/// The manifest a task returns to the framework.
///
/// Transported base64-encoded so the framework can pipe one task's result
/// into the next without interpreting it.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    /// Records of the artifacts the task wrote.
    ///
    pub output_files: Vec<OutputFile>,

    /// The workflow this task ran under, if any.
    ///
    #[serde(default)]
    pub workflow_id: Option<String>,

    /// The command string reported for the task.
    ///
    pub command: String,

    /// Free-form metadata about the overall task result.
    ///
    #[serde(default)]
    pub meta: HashMap<String, String>,
}

impl TaskResult {
    /// Encode the manifest for transport: base64 over compact JSON.
    ///
    pub fn encode(&self) -> anyhow::Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(BASE64.encode(json))
    }

    /// Decode a manifest previously produced by [`TaskResult::encode`].
    ///
    pub fn decode(encoded: &str) -> anyhow::Result<TaskResult> {
        let json = BASE64
            .decode(encoded.trim())
            .context("piped result is not valid base64")?;
        serde_json::from_slice(&json).context("piped result is not a valid task result")
    }
}

/// Resolve the effective input list for a task.
///
/// When the framework pipes the previous task's encoded result, its output
/// files become this task's inputs and the explicit list is ignored. An
/// undecodable piped result is a contract violation and fails the task.
///
pub fn get_input_files(
    pipe_result: Option<&str>,
    input_files: Vec<InputFile>,
) -> anyhow::Result<Vec<InputFile>> {
    match pipe_result {
        Some(encoded) if !encoded.trim().is_empty() => {
            let result = TaskResult::decode(encoded)?;
            Ok(result.output_files.into_iter().map(InputFile::from).collect())
        }
        _ => Ok(input_files),
    }
}
