use anyhow::anyhow;
use async_trait::async_trait;
use lazy_static::lazy_static;
use log::error;

use services::ssdeep;

use crate::hashing::{classify_output, HashArtifact, HashContext};
use crate::task::{create_output_file, InputFile, OutputFile};

lazy_static! {
    static ref HASHER: SsdeepHasher = SsdeepHasher;
}

/// Returns a reference to the global hasher instance.
///
pub fn hasher() -> &'static SsdeepHasher {
    &HASHER
}

/// FuzzyHasher is the interface for producing one hash artifact per input
/// file.
///
/// Implementations are required to be thread safe.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FuzzyHasher: Send + Sync {
    /// Hash a single input file and send the resulting artifact record
    /// through the context.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The context of the hash task.
    /// * `input` - The input file to hash; must carry a path.
    ///
    async fn hash(&self, ctx: &HashContext, input: &InputFile) -> anyhow::Result<()>;

    /// Returns the name of the hasher.
    ///
    fn name(&self) -> &'static str;
}

/// The default hasher, backed by the external `ssdeep` tool.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SsdeepHasher;

#[async_trait]
impl FuzzyHasher for SsdeepHasher {
    async fn hash(&self, ctx: &HashContext, input: &InputFile) -> anyhow::Result<()> {
        let path = input.path.as_deref().ok_or_else(|| anyhow!("input file has no path"))?;

        let output = ssdeep().hash_file(path).await?;
        let artifact = classify_output(&output);
        if let HashArtifact::ToolError { .. } = &artifact {
            error!("SSDeep failed for {}: {}", path, artifact);
        }

        let record = write_artifact(ctx, input, &artifact).await?;
        ctx.add_output(record).await
    }

    fn name(&self) -> &'static str {
        "SSDeep"
    }
}

/// Write the artifact for one input file into the task's output directory.
///
/// The artifact is named `<original_filename>.ssdeep` and contains the
/// classified text plus a trailing newline.
///
pub(crate) async fn write_artifact(
    ctx: &HashContext,
    input: &InputFile,
    artifact: &HashArtifact,
) -> anyhow::Result<OutputFile> {
    let filename = format!("{}.ssdeep", input.original_filename());
    let path = ctx.output_dir.join(filename);
    tokio::fs::write(&path, format!("{}\n", artifact)).await?;

    let display_name = format!("SSDeep hash for {}", input.display_name());
    Ok(create_output_file(path, display_name, "text/plain"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn context(output_dir: &std::path::Path) -> (HashContext, tokio::sync::mpsc::Receiver<OutputFile>) {
        let (output_sink, outputs) = tokio::sync::mpsc::channel(10);
        let ctx = crate::hashing::HashContextBuilder::new(output_dir, output_sink).build();
        (ctx, outputs)
    }

    #[test]
    fn test_hasher_name() {
        assert_eq!(hasher().name(), "SSDeep");
    }

    #[tokio::test]
    async fn test_write_artifact_hash() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _outputs) = context(dir.path());
        let input = InputFile::from_path("/data/in/report.txt");
        let artifact = HashArtifact::Hash("3:abc:def".to_string());

        let record = write_artifact(&ctx, &input, &artifact).await.unwrap();

        let expected_path = dir.path().join("report.txt.ssdeep");
        assert_eq!(record.path, expected_path.to_string_lossy());
        assert_eq!(record.display_name, "SSDeep hash for input_file");
        assert_eq!(record.data_type, "text/plain");

        let content = std::fs::read_to_string(expected_path).unwrap();
        assert_eq!(content, "3:abc:def\n");
    }

    #[tokio::test]
    async fn test_write_artifact_notice() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _outputs) = context(dir.path());
        let input = InputFile {
            path: Some("/data/in/tiny.bin".to_string()),
            display_name: Some("tiny.bin".to_string()),
            ..InputFile::default()
        };
        let artifact = HashArtifact::Notice("file too small".to_string());

        let record = write_artifact(&ctx, &input, &artifact).await.unwrap();

        assert_eq!(record.display_name, "SSDeep hash for tiny.bin");

        let content = std::fs::read_to_string(dir.path().join("tiny.bin.ssdeep")).unwrap();
        assert_eq!(content, "SSDeep notice: file too small\n");
    }

    #[tokio::test]
    async fn test_write_artifact_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let (ctx, _outputs) = context(&missing);
        let input = InputFile::from_path("/data/in/report.txt");
        let artifact = HashArtifact::Hash("3:abc:def".to_string());

        let result = write_artifact(&ctx, &input, &artifact).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_hash_requires_path() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _outputs) = context(dir.path());
        let input = InputFile::default();

        let result = hasher().hash(&ctx, &input).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().to_string(), "input file has no path");
    }
}
