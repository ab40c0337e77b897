use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a folder as a tree and concatenate its text files into one report"
)]
pub struct Cli {
    /// Folder to scan
    pub folder: PathBuf,

    /// Control file to use, skipping the prompt when both exist
    #[arg(long, value_enum)]
    pub mode: Option<ModeChoice>,

    /// Report file to write (defaults to output.txt in the current directory)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Write only the directory tree, without file contents
    #[arg(long)]
    pub tree: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChoice {
    Ignore,
    Obey,
}
