use std::fmt;
use std::path::PathBuf;

/// Filtering strategy chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Drop hidden paths and anything matching a pattern.
    Ignore,
    /// Keep only paths matching a pattern.
    Obey,
    /// Keep everything.
    Unrestricted,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Ignore => "ignore",
            Mode::Obey => "obey",
            Mode::Unrestricted => "unrestricted",
        };
        f.write_str(name)
    }
}

/// Represents the final configuration after merging settings, control files and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    /// Folder name shown on the first report line.
    pub root_name: String,
    pub mode: Mode,
    pub patterns: Vec<String>,
    pub output: PathBuf,
    pub tree_only_output: bool,
}

/// A single filesystem node seen during traversal.
#[derive(Debug)]
pub struct PathEntry {
    pub path: PathBuf,
    pub name: String,
    pub relative_path: String,
    pub is_dir: bool,
}

/// A file whose content goes into the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludedFile {
    pub path: PathBuf,
    pub relative_path: String,
}

/// Accumulated output of a walk, in display order.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub tree_lines: Vec<String>,
    pub included_files: Vec<IncludedFile>,
}
