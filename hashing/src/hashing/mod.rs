use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tokio::sync::mpsc::Sender;

use services::SsdeepOutput;

use crate::task::OutputFile;

pub use self::hasher::*;

mod hasher;

/// The classified result of one `ssdeep` run.
///
/// Whatever the classification, the task writes an artifact for the file; a
/// bad run never fails the task.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashArtifact {
    /// A well-formed fuzzy hash captured from the tool.
    ///
    Hash(String),

    /// A non-hash message the tool printed to stdout, such as its
    /// file-too-small notice.
    ///
    Notice(String),

    /// The tool exited with a non-zero status.
    ///
    ToolError {
        /// The exit code, or `?` when the tool was terminated by a signal.
        ///
        code: String,

        /// Trimmed stderr, falling back to trimmed stdout.
        ///
        details: String,
    },
}

impl Display for HashArtifact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash(hash) => write!(f, "{}", hash),
            Self::Notice(notice) => write!(f, "SSDeep notice: {}", notice),
            Self::ToolError { code, details } => {
                write!(f, "Error running ssdeep (code {}): {}", code, details)
            }
        }
    }
}

/// Classify the captured output of one `ssdeep` run.
///
/// A successful hash appears on stdout as `HASH,"FILENAME"`; anything else on
/// stdout is a notice from the tool rather than a hash.
///
pub fn classify_output(output: &SsdeepOutput) -> HashArtifact {
    if !output.exit_status.success() {
        let details = if output.stderr.is_empty() {
            output.stdout.clone()
        } else {
            output.stderr.clone()
        };
        HashArtifact::ToolError {
            code: output.code(),
            details,
        }
    } else if let Some((hash, _)) = output.stdout.split_once(",\"") {
        HashArtifact::Hash(hash.to_string())
    } else {
        HashArtifact::Notice(output.stdout.clone())
    }
}

/// Defines the context for one hash task.
///
/// This is passed to the hasher for every input file and carries the output
/// directory along with the sink the task's artifact records are sent to.
///
#[derive(Debug, Clone)]
pub struct HashContext {
    /// Directory the task writes its artifacts into.
    ///
    pub output_dir: PathBuf,

    /// The workflow this task runs under, if any.
    ///
    pub workflow_id: Option<String>,

    output_sink: Sender<OutputFile>,
}

impl HashContext {
    /// Adds an artifact record to be sent through the output channel created
    /// by the caller of the task.
    ///
    pub async fn add_output(&self, output: OutputFile) -> anyhow::Result<()> {
        self.output_sink.send(output).await.map_err(|e| anyhow!(e))
    }
}

/// Builder for HashContext.
///
#[derive(Debug, Clone)]
pub struct HashContextBuilder {
    output_dir: PathBuf,
    workflow_id: Option<String>,
    output_sink: Sender<OutputFile>,
}

impl HashContextBuilder {
    /// Creates a new HashContextBuilder with the given output directory and
    /// artifact record sink.
    ///
    pub fn new(output_dir: impl AsRef<Path>, output_sink: Sender<OutputFile>) -> Self {
        HashContextBuilder {
            output_dir: output_dir.as_ref().to_path_buf(),
            workflow_id: None,
            output_sink,
        }
    }

    /// Sets the workflow ID.
    ///
    pub fn workflow_id(mut self, workflow_id: Option<String>) -> Self {
        self.workflow_id = workflow_id;
        self
    }

    /// Build the HashContext.
    ///
    pub fn build(self) -> HashContext {
        HashContext {
            output_dir: self.output_dir,
            workflow_id: self.workflow_id,
            output_sink: self.output_sink,
        }
    }
}
