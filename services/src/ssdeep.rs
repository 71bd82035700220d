use std::path::Path;

use anyhow::anyhow;
use lazy_static::lazy_static;
use log::debug;

use crate::{run_tool, ToolOutput};

const PROGRAM: &str = "ssdeep";

const DEFAULT_ARGS: [&str; 2] = [
    "-s", // Silent mode; suppress error chatter on stderr
    "-b", // Bare mode; strip directory components from the reported file name
];

/// The type of the singleton instance of the `ssdeep` service.
///
pub type SsdeepService = Box<Ssdeep>;

lazy_static! {
    static ref SSDEEP: SsdeepService = Box::<Ssdeep>::default();
}

/// Returns the singleton instance of the `ssdeep` service.
///
pub fn ssdeep() -> &'static SsdeepService {
    &SSDEEP
}

/// The captured result of one `ssdeep` invocation.
///
/// A successful hash appears on stdout as `HASH,"FILENAME"`. The tool also
/// uses stdout for notices such as its file-too-small message, so the output
/// is handed back uninterpreted for the task layer to classify.
///
pub type SsdeepOutput = ToolOutput;

/// The `ssdeep` fuzzy-hashing service.
///
#[derive(Default)]
pub struct Ssdeep;

impl Ssdeep {
    /// Run `ssdeep` against a single file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the file to hash.
    ///
    /// # Returns
    ///
    /// The captured output of the run, whether or not the tool exited
    /// successfully. An error is returned only when the tool could not be
    /// spawned, such as when the binary is not installed.
    ///
    pub async fn hash_file(&self, path: impl AsRef<Path>) -> anyhow::Result<SsdeepOutput> {
        let path_str = path.as_ref().to_str().ok_or(anyhow!("failed to convert path to string"))?;

        let arguments = DEFAULT_ARGS.iter().copied().chain([path_str]);
        let output = run_tool(PROGRAM, arguments).await?;
        debug!("ssdeep exited with {} for {}", output.code(), path_str);

        Ok(output)
    }
}
