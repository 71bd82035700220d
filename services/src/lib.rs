//!
//! Provides wrappers around the external command-line tools used by the
//! hashing task.
//!
#![warn(missing_docs)]

use std::ffi::OsStr;
use std::process::{ExitStatus, Stdio};

mod config;
mod ssdeep;

pub use config::*;
pub use ssdeep::*;

/// The captured result of running an external tool to completion.
///
/// The exit status is carried alongside the captured streams so callers can
/// decide how to treat a failed run; a non-zero exit is not an error at this
/// layer.
///
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// The exit status the tool finished with.
    ///
    pub exit_status: ExitStatus,

    /// Trimmed stdout of the tool.
    ///
    pub stdout: String,

    /// Trimmed stderr of the tool.
    ///
    pub stderr: String,
}

impl ToolOutput {
    /// Returns the exit code of the tool as a displayable string.
    ///
    /// Processes terminated by a signal have no code and are shown as `?`.
    ///
    pub fn code(&self) -> String {
        self.exit_status
            .code()
            .map(|code| code.to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

fn trim_to_string(value: &[u8]) -> String {
    String::from_utf8_lossy(value)
        .replace('\u{0}', "")
        .trim()
        .to_string()
}

/// Run a tool to completion and capture its output.
///
/// Nothing is written to the tool's stdin; stdout and stderr are captured in
/// full and trimmed.
///
/// # Arguments
///
/// * `program` - The program to run.
/// * `arguments` - The arguments to pass to the program.
///
/// # Returns
///
/// * `Ok(ToolOutput)` - If the tool ran to completion, regardless of its exit
///     status.
/// * `Err(_)` - If the tool could not be spawned or awaited, such as when the
///     program is not installed.
///
pub(crate) async fn run_tool(
    program: impl AsRef<str>,
    arguments: impl IntoIterator<Item = impl AsRef<OsStr>>,
) -> anyhow::Result<ToolOutput> {
    let output = tokio::process::Command::new(program.as_ref())
        .args(arguments)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    Ok(ToolOutput {
        exit_status: output.status,
        stdout: trim_to_string(&output.stdout),
        stderr: trim_to_string(&output.stderr),
    })
}
