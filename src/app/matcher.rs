use crate::app::models::Mode;
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Decides per relative path whether an entry belongs in the report.
pub struct PatternMatcher {
    mode: Mode,
    set: GlobSet,
}

impl PatternMatcher {
    pub fn new(mode: Mode, patterns: &[String]) -> Result<Self> {
        Ok(Self {
            mode,
            set: build_globset(patterns)?,
        })
    }

    /// `relative_path` must already be `/`-separated.
    pub fn should_include(&self, relative_path: &str, is_dir: bool) -> bool {
        match self.mode {
            Mode::Unrestricted => true,
            Mode::Ignore => !is_hidden(relative_path) && !self.matches(relative_path, is_dir),
            Mode::Obey => self.matches(relative_path, is_dir),
        }
    }

    fn matches(&self, relative_path: &str, is_dir: bool) -> bool {
        if self.set.is_match(relative_path) {
            return true;
        }
        // Lets `build/` style patterns hit the directory itself.
        is_dir && self.set.is_match(format!("{relative_path}/"))
    }
}

fn is_hidden(relative_path: &str) -> bool {
    relative_path.split('/').any(|segment| segment.starts_with('.'))
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(&escape_literals(pat))
            .allow_unclosed_class(true)
            .build()
            .context(format!("Invalid glob pattern: {}", pat))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Braces and unclosed `[` are plain characters in shell-style patterns, so
/// outside a character class they become single-character classes.
fn escape_literals(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut escaped = String::with_capacity(pattern.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '[' {
            if let Some(end) = class_end(&chars, i) {
                escaped.extend(&chars[i..=end]);
                i = end + 1;
                continue;
            }
        }
        match chars[i] {
            '[' => escaped.push_str("[[]"),
            '{' => escaped.push_str("[{]"),
            '}' => escaped.push_str("[}]"),
            c => escaped.push(c),
        }
        i += 1;
    }
    escaped
}

/// Index of the `]` closing the class opened at `start`. A `]` right after the
/// opening bracket (or its `!`/`^`) is a member, not the terminator.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if matches!(chars.get(j), Some('!') | Some('^')) {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars[j.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}
