//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `fhir_worklist` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use fhir_worklist::initialization::init_logger_with;
use fhir_worklist::{run, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials usually live in .env; try the current directory, then the executable's
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(opt).await {
        eprintln!("fhir_worklist error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
