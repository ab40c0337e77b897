use crate::app::cli::{Cli, ModeChoice};
use crate::app::models::{Mode, RuntimeConfig};
use crate::app::walker::normalize_separators;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// User-level defaults from `~/.config/folder_digest/settings.toml`.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Settings {
    pub output: PathBuf,
    pub ignore_file: String,
    pub obey_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: PathBuf::from("output.txt"),
            ignore_file: "ignore.txt".to_string(),
            obey_file: "obey.txt".to_string(),
        }
    }
}

fn load_settings() -> Result<Settings> {
    let Some(home) = dirs::home_dir() else {
        log::debug!("No home directory, using default settings");
        return Ok(Settings::default());
    };
    let config_path = home
        .join(".config")
        .join("folder_digest")
        .join("settings.toml");

    if !config_path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read settings at {:?}", config_path))?;
    parse_settings(&content).context(format!("Failed to parse {:?}", config_path))
}

fn parse_settings(content: &str) -> Result<Settings> {
    Ok(toml::from_str(content)?)
}

/// Parses a control file body: `#` starts a comment, blanks are skipped,
/// separators become `/`, duplicates collapse in first-seen order.
pub fn parse_patterns(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    content
        .lines()
        .filter_map(|line| {
            let line = line.split('#').next().unwrap_or_default().trim();
            (!line.is_empty()).then(|| normalize_separators(line))
        })
        .filter(|pattern| seen.insert(pattern.clone()))
        .collect()
}

fn read_patterns(path: &Path) -> Result<Vec<String>> {
    let content =
        fs::read_to_string(path).context(format!("Failed to read pattern file {:?}", path))?;
    let patterns = parse_patterns(&content);
    log::info!("Loaded {} patterns from {:?}", patterns.len(), path);
    Ok(patterns)
}

/// Asks which control file to use when both exist.
pub fn prompt_mode(input: &mut impl BufRead, out: &mut impl Write) -> Result<ModeChoice> {
    writeln!(out, "Both ignore and obey files were found. Which one should be used?")?;
    write!(out, "Type 'ignore' to use the ignore list or 'obey' to use the obey list: ")?;
    out.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    match answer.trim() {
        "ignore" => Ok(ModeChoice::Ignore),
        "obey" => Ok(ModeChoice::Obey),
        other => bail!("Invalid choice {:?}; expected 'ignore' or 'obey'", other),
    }
}

/// Picks the mode and its pattern file from what exists in `control_dir`.
pub fn resolve_mode(
    control_dir: &Path,
    settings: &Settings,
    requested: Option<ModeChoice>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(Mode, Vec<String>)> {
    let ignore_file = control_dir.join(&settings.ignore_file);
    let obey_file = control_dir.join(&settings.obey_file);

    let choice = match (requested, ignore_file.is_file(), obey_file.is_file()) {
        (Some(choice), _, _) => Some(choice),
        (None, true, true) => Some(prompt_mode(input, out)?),
        (None, true, false) => Some(ModeChoice::Ignore),
        (None, false, true) => Some(ModeChoice::Obey),
        (None, false, false) => None,
    };

    let resolved = match choice {
        Some(ModeChoice::Ignore) => {
            let patterns = read_patterns(&ignore_file)?;
            writeln!(out, "Using {}: matching entries are skipped.", settings.ignore_file)?;
            (Mode::Ignore, patterns)
        }
        Some(ModeChoice::Obey) => {
            let patterns = read_patterns(&obey_file)?;
            writeln!(out, "Using {}: only matching entries are shown.", settings.obey_file)?;
            (Mode::Obey, patterns)
        }
        None => {
            writeln!(
                out,
                "Neither {} nor {} found; showing every file in the folder.",
                settings.ignore_file, settings.obey_file
            )?;
            (Mode::Unrestricted, Vec::new())
        }
    };
    Ok(resolved)
}

/// Merges CLI args, user settings and control files into one config.
pub fn resolve_config(
    cli: Cli,
    control_dir: &Path,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<RuntimeConfig> {
    let settings = load_settings()?;
    resolve_config_with(cli, control_dir, &settings, input, out)
}

fn resolve_config_with(
    cli: Cli,
    control_dir: &Path,
    settings: &Settings,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<RuntimeConfig> {
    let root = fs::canonicalize(&cli.folder)
        .context(format!("Cannot access folder {:?}", cli.folder))?;
    if !root.is_dir() {
        bail!("{:?} is not a directory", cli.folder);
    }
    let root_name = display_name(&cli.folder, &root);

    let (mode, patterns) = resolve_mode(control_dir, settings, cli.mode, input, out)?;
    log::info!("Resolved mode {} with {} patterns", mode, patterns.len());

    let output = cli.output.unwrap_or_else(|| settings.output.clone());

    Ok(RuntimeConfig {
        root,
        root_name,
        mode,
        patterns,
        output: control_dir.join(output),
        tree_only_output: cli.tree,
    })
}

/// Base name of the folder as given, keeping symlinked names; falls back to
/// the canonical path when the given one ends in `..` or is a root.
fn display_name(folder: &Path, canonical: &Path) -> String {
    std::path::absolute(folder)
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .or_else(|| canonical.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| canonical.display().to_string())
}
