use std::collections::HashSet;
use tracing::debug;

/// Extensions collected when nothing else is configured, without the dot.
pub const DEFAULT_INCLUDE_EXTENSIONS: &[&str] = &[
    // Frontend
    "ts",
    "html",
    "css",
    "scss",
    "json",
    "md",
    "js",
    // Backend
    "java",
    "properties",
    "yml",
    "yaml",
    "xml",
];

/// Directory names that are pruned before descent.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    ".angular",
    "cache",
    ".vscode",
    "__pycache__",
    "cypress",
];

/// Exact file names never collected. Mostly large config files that add
/// little to a prompt about application logic.
pub const DEFAULT_IGNORE_FILES: &[&str] = &[
    "package-lock.json",
    "angular.json",
    "tsconfig.app.json",
    "tsconfig.json",
    "tsconfig.spec.json",
    ".gitignore",
];

/// Which files the aggregator selects. Built once, then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    include_extensions: HashSet<String>,
    ignore_dirs: HashSet<String>,
    ignore_files: HashSet<String>,
    sorted: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            include_extensions: DEFAULT_INCLUDE_EXTENSIONS
                .iter()
                .map(|e| normalize_extension(e))
                .collect(),
            ignore_dirs: to_set(DEFAULT_IGNORE_DIRS),
            ignore_files: to_set(DEFAULT_IGNORE_FILES),
            sorted: false,
        }
    }
}

impl ScanConfig {
    /// A configuration with every set empty. Nothing qualifies until
    /// extensions are added.
    pub fn empty() -> Self {
        ScanConfig {
            include_extensions: HashSet::new(),
            ignore_dirs: HashSet::new(),
            ignore_files: HashSet::new(),
            sorted: false,
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.include_extensions
            .extend(extensions.into_iter().map(|e| normalize_extension(e.as_ref())));
        self
    }

    pub fn with_only_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.include_extensions.clear();
        self.with_extensions(extensions)
    }

    pub fn with_ignore_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignore_dirs
            .extend(dirs.into_iter().map(|d| d.as_ref().to_owned()));
        self
    }

    pub fn with_ignore_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignore_files
            .extend(files.into_iter().map(|f| f.as_ref().to_owned()));
        self
    }

    /// Visit each directory's files in file-name order, then its
    /// subdirectories in file-name order. Unsorted walks use OS listing
    /// order, where files and subdirectories interleave.
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Exact, case-sensitive directory name match.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.contains(name)
    }

    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.ignore_files.contains(name)
    }

    /// `extension` is what follows the final dot, or `""` when there is none.
    pub fn includes_extension(&self, extension: &str) -> bool {
        self.include_extensions.contains(extension)
    }

    pub fn log_summary(&self) {
        debug!(
            "Scan config: extensions={:?} ignore_dirs={:?} ignore_files={:?} sorted={}",
            self.include_extensions, self.ignore_dirs, self.ignore_files, self.sorted
        );
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.strip_prefix('.').unwrap_or(extension).to_owned()
}

fn to_set(values: &[&str]) -> HashSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}
