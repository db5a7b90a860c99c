//! Gallery file discovery
//!
//! Finds image files under a directory with extension and glob filters.

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File scanner with configurable filters
#[derive(Debug, Clone)]
pub struct GalleryScanner {
    root: PathBuf,
    extensions: Vec<String>,
    exclude_patterns: Vec<glob::Pattern>,
    follow_links: bool,
    max_depth: Option<usize>,
    include_hidden: bool,
}

impl GalleryScanner {
    /// Create a new scanner rooted at the given path
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: Vec::new(),
            exclude_patterns: Vec::new(),
            follow_links: false,
            max_depth: None,
            include_hidden: false,
        }
    }

    /// Create a scanner from the `[scan]` configuration section
    pub fn from_config(root: impl Into<PathBuf>, config: &ScanConfig) -> Result<Self> {
        let mut scanner = Self::new(root)
            .with_extensions(&config.extensions)
            .follow_links(config.follow_links)
            .include_hidden(config.include_hidden)
            .exclude(&config.exclude)?;
        // 0 lifts the limit; TOML has no null to clear the default
        scanner.max_depth = config.max_depth.filter(|&depth| depth > 0);
        Ok(scanner)
    }

    /// Filter by file extensions (e.g., "jpg", "jpeg"), compared case-insensitively
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|s| s.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Add glob patterns to exclude
    pub fn exclude<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            let compiled = glob::Pattern::new(pattern.as_ref()).map_err(|e| {
                Error::config(format!("Invalid exclude pattern {:?}: {}", pattern.as_ref(), e))
            })?;
            self.exclude_patterns.push(compiled);
        }
        Ok(self)
    }

    /// Whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Limit how deep the walk descends
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Whether to descend into dot-directories and report dot-files
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Scan and return matching files, sorted by path
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(Error::directory_not_found(&self.root));
        }

        let mut walker = WalkDir::new(&self.root).follow_links(self.follow_links);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut files = Vec::new();

        for entry in walker
            .into_iter()
            .filter_entry(|e| self.include_hidden || e.depth() == 0 || !is_hidden(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() && !(self.follow_links && entry.path().is_file()) {
                continue;
            }

            let path = entry.path();
            if !self.matches_extension(path) || self.is_excluded(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        tracing::debug!(root = %self.root.display(), count = files.len(), "gallery scan complete");
        Ok(files)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|e| *e == ext))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude_patterns
            .iter()
            .any(|p| p.matches_path(relative) || p.matches_path(path))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
