use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use upload_core::AttemptStatus;
use upload_logging::LogDestination;

mod platform;

#[derive(Parser, Debug, Clone)]
#[command(name = "upload_app", about = "Upload an image and show what the server sends back")]
pub struct Args {
    /// File(s) to select; only the first one is uploaded
    files: Vec<PathBuf>,

    /// Upload endpoint, overrides the config file
    #[arg(long)]
    endpoint: Option<String>,

    /// Path to a RON config file (default: ./upload_app.ron if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory where the returned image is stored
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log destination: terminal, file or both
    #[arg(long, default_value = "terminal")]
    log: LogDestination,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match platform::run_app(&args) {
        Ok(AttemptStatus::Succeeded) => ExitCode::SUCCESS,
        Ok(AttemptStatus::Idle) => {
            eprintln!("nothing to submit: no file selected");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
