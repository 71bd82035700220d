use std::path;

use clap::Parser;
use log::info;

use hashing::run_hash_task;
use hashing::task::InputFile;

#[derive(Parser, Debug)]
struct Args {
    #[arg(
        short = 'i',
        long,
        num_args = 1..,
        value_parser = parse_file_path
    )]
    inputs: Vec<path::PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_parser = parse_directory_path
    )]
    output: path::PathBuf,

    #[arg(short = 'w', long)]
    workflow_id: Option<String>,
}

fn parse_path(path_str: &str) -> Result<path::PathBuf, String> {
    let input_path = path::PathBuf::from(path_str.to_string());
    if input_path.exists() {
        Ok(input_path)
    } else {
        Err(format!("Path {} not found", path_str))
    }
}

fn parse_file_path(path_str: &str) -> Result<path::PathBuf, String> {
    let path = parse_path(path_str)?;
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("path {} is not a file", path_str))
    }
}

fn parse_directory_path(path_str: &str) -> Result<path::PathBuf, String> {
    let path = parse_path(path_str)?;
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("path {} is not a directory", path_str))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    simple_logger::init_with_level(log::Level::Info)?;
    let args = Args::parse();

    let inputs = args.inputs
        .iter()
        .map(|path| InputFile::from_path(path.to_string_lossy()))
        .collect();

    let result = run_hash_task(None, inputs, &args.output, args.workflow_id).await?;

    if let Some(message) = result.meta.get("message") {
        info!("{}", message);
    }
    for output in &result.output_files {
        println!("{}", output.path);
    }

    Ok(())
}
