use hashing::run_hash_task;
use hashing::task::InputFile;
use test_utils::{random_bytes, temp_dir, write_input_file};

#[tokio::test]
async fn test_bad_pipe_result_fails_before_hashing() {
    let output_dir = temp_dir().unwrap();

    let result = run_hash_task(Some("not-a-pipe-result"), vec![], output_dir.path(), None).await;

    assert!(result.is_err());
}

#[tokio::test]
#[ignore = "requires the ssdeep binary"]
async fn test_hash_task_end_to_end() -> anyhow::Result<()> {
    let input_dir = temp_dir()?;
    let output_dir = temp_dir()?;

    let large_path = write_input_file(input_dir.path(), "large.txt", &random_bytes(64 * 1024))?;
    let small_path = write_input_file(input_dir.path(), "small.txt", b"tiny")?;

    let inputs = vec![
        InputFile::from_path(large_path.to_string_lossy()),
        InputFile::from_path(small_path.to_string_lossy()),
    ];

    let result = run_hash_task(None, inputs, output_dir.path(), Some("wf-e2e".to_string())).await?;

    assert_eq!(result.output_files.len(), 2);
    assert_eq!(result.command, "ssdeep -s -b");

    // The artifact for a file of meaningful size ends with a well-formed
    // fuzzy hash: blocksize:part:part.
    let large_artifact = std::fs::read_to_string(output_dir.path().join("large.txt.ssdeep"))?;
    let hash_line = large_artifact.trim_end().lines().last().unwrap();
    assert_eq!(hash_line.split(':').count(), 3);
    assert!(hash_line.split(':').next().unwrap().parse::<u64>().is_ok());

    // The artifact for a too-small file carries the tool's diagnostic text
    // rather than a hash line.
    let small_artifact = std::fs::read_to_string(output_dir.path().join("small.txt.ssdeep"))?;
    assert!(!small_artifact.is_empty());
    assert!(!small_artifact.contains(",\""));

    Ok(())
}
