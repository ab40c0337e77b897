// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod matcher;
pub mod models;
pub mod walker;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::io;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::matcher::PatternMatcher;
use self::walker::TreeWalker;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Control files and the report live in the invoking directory
    let current_dir = env::current_dir().context("Failed to get current directory")?;

    // 3. Resolve Configuration
    let stdin = io::stdin();
    let config = resolve_config(args, &current_dir, &mut stdin.lock(), &mut io::stdout())?;

    // 4. Walk
    let matcher = PatternMatcher::new(config.mode, &config.patterns)?;
    let walker = TreeWalker::new(config.root.clone(), &matcher);
    let result = walker.walk();

    if result.included_files.is_empty() {
        log::warn!("No files matched in {}", config.root.display());
    }

    // 5. Write Report
    OutputGenerator::write_report(
        &config.output,
        &config.root_name,
        &result,
        config.tree_only_output,
    )?;

    println!("Output written to {}", config.output.display());
    Ok(())
}
