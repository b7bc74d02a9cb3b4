use crate::config::ScanConfig;
use crate::errors::{PromptError, SkipReason};
use crate::reporting::Reporter;
use crate::utils::{absolutize, relative_path};
use std::fs;
use std::path::Path;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

pub fn start_marker(relative_path: &str) -> String {
    format!("--- START FILE: {} ---", relative_path)
}

pub fn end_marker(relative_path: &str) -> String {
    format!("--- END FILE: {} ---", relative_path)
}

/// One collected file, already serialized into its delimited block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlock {
    relative_path: String,
    text: String,
}

impl FileBlock {
    fn new(relative_path: String, content: &str) -> Self {
        // start line, raw content, end line, then the trailing blank line
        let text = format!(
            "{}\n{}\n{}\n",
            start_marker(&relative_path),
            content,
            end_marker(&relative_path)
        );
        FileBlock {
            relative_path,
            text,
        }
    }

    /// Path relative to the display root, always with `/` separators.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The blocks of every qualifying file, in discovery order.
///
/// An empty aggregate is a valid result: the root existed but nothing in it
/// qualified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    blocks: Vec<FileBlock>,
}

impl Aggregate {
    pub fn blocks(&self) -> &[FileBlock] {
        &self.blocks
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.relative_path())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Joins the blocks with newlines. Each block already ends in a newline,
    /// so consecutive files are separated by a blank line.
    pub fn render(&self) -> String {
        self.blocks
            .iter()
            .map(FileBlock::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Walks a tree and collects the files selected by a [`ScanConfig`].
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: ScanConfig,
}

impl Aggregator {
    pub fn new(config: ScanConfig) -> Self {
        Aggregator { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Collects every qualifying file under `traversal_root`, naming each one
    /// relative to `display_root`.
    ///
    /// Fails with `InvalidRoot` when `traversal_root` is not an existing
    /// directory, and with `IoError` only if the current directory is needed
    /// to resolve a relative `display_root` and cannot be read. Files that
    /// cannot be read or decoded are reported and left out.
    pub fn aggregate(
        &self,
        traversal_root: &Path,
        display_root: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<Aggregate, PromptError> {
        let scan_root = absolutize(traversal_root)
            .map_err(|_| PromptError::InvalidRoot(traversal_root.to_path_buf()))?;
        let display_root = absolutize(display_root)?;

        if !scan_root.is_dir() {
            return Err(PromptError::InvalidRoot(scan_root));
        }

        self.config.log_summary();
        reporter.scanned(&scan_root);

        let mut walker = WalkDir::new(&scan_root).follow_links(false);
        if self.config.is_sorted() {
            // a level's files come before its subdirectories
            walker = walker.sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            });
        }

        let mut aggregate = Aggregate::default();
        let entries = walker
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let location = err.path().unwrap_or(scan_root.as_path());
                    reporter.skipped(
                        &relative_path(location, &display_root),
                        &SkipReason::Read(err.to_string()),
                    );
                    continue;
                }
            };

            if !is_candidate_file(&entry) || !self.is_selected(&entry) {
                continue;
            }

            let rel = relative_path(entry.path(), &display_root);
            match read_text(entry.path()) {
                Ok(content) => {
                    aggregate.blocks.push(FileBlock::new(rel.clone(), &content));
                    reporter.added(&rel);
                }
                Err(reason) => reporter.skipped(&rel, &reason),
            }
        }

        debug!(
            "Collected {} file(s) under {}",
            aggregate.len(),
            scan_root.display()
        );
        Ok(aggregate)
    }

    /// Ignored directories are cut before descent. The walk root is never cut.
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let pruned = entry
            .file_name()
            .to_str()
            .map(|name| self.config.is_ignored_dir(name))
            .unwrap_or(false);
        if pruned {
            trace!("Pruning directory: {}", entry.path().display());
        }
        pruned
    }

    fn is_selected(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        if self.config.is_ignored_file(&name) {
            trace!("Ignoring file by name: {}", name);
            return false;
        }
        match file_extension(entry.path()) {
            Some(ext) => self.config.includes_extension(ext),
            None => false,
        }
    }
}

/// Regular files, plus symlinks that do not point at a directory. Dangling
/// links stay candidates so the failed read gets reported.
fn is_candidate_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}

/// Text after the final dot, `""` when there is none (including dotfiles such
/// as `.env`), `None` when the extension is not valid UTF-8.
fn file_extension(path: &Path) -> Option<&str> {
    match path.extension() {
        Some(ext) => ext.to_str(),
        None => Some(""),
    }
}

fn read_text(path: &Path) -> Result<String, SkipReason> {
    let bytes = fs::read(path).map_err(|e| SkipReason::Read(e.to_string()))?;
    String::from_utf8(bytes).map_err(|_| SkipReason::Encoding)
}
