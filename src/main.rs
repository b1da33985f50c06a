//! CLI entry point for the Wave Function Collapse image generator

use clap::Parser;
use std::process::ExitCode;
use wfc::io::cli::{Cli, GenerationTask};

// Allow print for the one-line diagnostic on failure
#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    let cli = Cli::parse();
    let task = GenerationTask::new(cli);
    if let Err(error) = task.process() {
        eprintln!("wfc: {error}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
