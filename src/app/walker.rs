use crate::app::matcher::PatternMatcher;
use crate::app::models::{IncludedFile, PathEntry, ScanResult};
use pathdiff::diff_paths;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

const BRANCH: &str = "├─";
const LAST_BRANCH: &str = "└─";
const CONTINUATION: &str = "│  ";
const PADDING: &str = "   ";

pub struct TreeWalker<'a> {
    root: PathBuf,
    matcher: &'a PatternMatcher,
    // Pruning re-lists directories, so failures are remembered to warn once.
    unreadable: RefCell<HashSet<PathBuf>>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: PathBuf, matcher: &'a PatternMatcher) -> Self {
        Self {
            root,
            matcher,
            unreadable: RefCell::default(),
        }
    }

    /// Depth-first walk producing tree lines (root name excluded) and the files
    /// to include, both in display order.
    pub fn walk(&self) -> ScanResult {
        let mut result = ScanResult::default();
        self.walk_dir(&self.root, "", &mut result);
        log::debug!(
            "Walk finished: {} tree lines, {} files",
            result.tree_lines.len(),
            result.included_files.len()
        );
        result
    }

    fn walk_dir(&self, dir: &Path, prefix: &str, result: &mut ScanResult) {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for entry in self.list_dir(dir) {
            if entry.is_dir {
                if self.has_included_files(&entry.path) {
                    dirs.push(entry);
                }
            } else if self.matcher.should_include(&entry.relative_path, false) {
                files.push(entry);
            }
        }

        let count = dirs.len() + files.len();
        for (i, entry) in dirs.into_iter().chain(files).enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            result
                .tree_lines
                .push(format!("{}{}{}", prefix, connector, entry.name));

            if entry.is_dir {
                let extension = if is_last { PADDING } else { CONTINUATION };
                self.walk_dir(&entry.path, &format!("{prefix}{extension}"), result);
            } else {
                result.included_files.push(IncludedFile {
                    path: entry.path,
                    relative_path: entry.relative_path,
                });
            }
        }
    }

    /// True when some file below `dir` passes the matcher. Descends into every
    /// subdirectory, including ones the matcher itself rejects.
    fn has_included_files(&self, dir: &Path) -> bool {
        self.list_dir(dir).into_iter().any(|entry| {
            if entry.is_dir {
                self.has_included_files(&entry.path)
            } else {
                self.matcher.should_include(&entry.relative_path, false)
            }
        })
    }

    /// Entries of `dir` sorted by name. Unreadable directories yield nothing.
    fn list_dir(&self, dir: &Path) -> Vec<PathEntry> {
        let read_dir = match fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(err) => {
                if self.unreadable.borrow_mut().insert(dir.to_path_buf()) {
                    log::warn!("Skipping unreadable directory {}: {}", dir.display(), err);
                }
                return Vec::new();
            }
        };

        let mut entries: Vec<PathEntry> = read_dir
            .filter_map(|result| match result {
                Ok(entry) => self.to_path_entry(&entry),
                Err(err) => {
                    log::warn!("Error reading entry in {}: {}", dir.display(), err);
                    None
                }
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    fn to_path_entry(&self, entry: &DirEntry) -> Option<PathEntry> {
        // file_type does not follow links, so a link to a directory is a file.
        let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
        let path = entry.path();
        let name = path.file_name()?.to_string_lossy().into_owned();
        let relative = diff_paths(&path, &self.root)?;
        let relative_path = normalize_separators(&relative.to_string_lossy());

        Some(PathEntry {
            path,
            name,
            relative_path,
            is_dir,
        })
    }
}

pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}
