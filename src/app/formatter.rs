use crate::app::models::{IncludedFile, ScanResult};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct OutputGenerator;

impl OutputGenerator {
    /// Root name, then one line per tree entry, then a blank separator line.
    pub fn write_tree(out: &mut impl Write, root_name: &str, result: &ScanResult) -> Result<()> {
        writeln!(out, "{}", root_name)?;
        for line in &result.tree_lines {
            writeln!(out, "{}", line)?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// A read or decode failure is written inline in place of the content.
    pub fn write_content(out: &mut impl Write, files: &[IncludedFile]) -> Result<()> {
        for file in files {
            writeln!(out, "【{}】", file.relative_path)?;
            match read_text(&file.path) {
                Ok(content) => out.write_all(content.as_bytes())?,
                Err(e) => {
                    log::warn!("Could not read {}: {:#}", file.relative_path, e);
                    writeln!(out, "Error reading file {}: {:#}", file.relative_path, e)?;
                }
            }
            out.write_all(b"\n\n")?;
        }
        Ok(())
    }

    pub fn write_report(
        path: &Path,
        root_name: &str,
        result: &ScanResult,
        tree_only: bool,
    ) -> Result<()> {
        let file = File::create(path).context(format!("Failed to create {:?}", path))?;
        let mut out = BufWriter::new(file);

        Self::write_tree(&mut out, root_name, result)?;
        if !tree_only {
            Self::write_content(&mut out, &result.included_files)?;
        }
        out.flush()
            .context(format!("Failed to write {:?}", path))?;
        Ok(())
    }
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).context("content is not valid UTF-8")
}
