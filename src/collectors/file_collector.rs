use crate::error::CollectorError;
use crate::report::{DateKey, FileEntry};
use log::{debug, info};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of the files picked up by a scan
const MARKDOWN_EXTENSION: &str = "md";

/// Dated markdown file collector
///
/// Walks a workspace folder recursively and picks up every `.md` file whose name
/// contains the date key, at any nesting depth.
pub struct FileCollector {
    /// Directory the scanned folders are resolved against
    base_dir: PathBuf,
}

impl FileCollector {
    /// Create a new FileCollector rooted at `base_dir`
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use activity_helper::collectors::FileCollector;
    /// use activity_helper::report::DateKey;
    ///
    /// let collector = FileCollector::new("/home/me/notes");
    /// let learnings = collector.scan("memory/learnings", &DateKey::today());
    /// ```
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory this collector resolves folders against
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Scan `folder` (relative to the base directory) for files dated `date`
    ///
    /// A folder that does not exist yields an empty list. Entries that cannot be
    /// read during the walk are skipped. Results are sorted by path.
    ///
    /// # Errors
    ///
    /// Returns `CollectorError::IoError` if the folder exists but cannot be listed,
    /// for instance when it is a regular file.
    pub fn scan(&self, folder: &str, date: &DateKey) -> Result<Vec<FileEntry>, CollectorError> {
        let root = self.base_dir.join(folder);
        if !root.exists() {
            debug!("Folder {} does not exist, nothing to scan", root.display());
            return Ok(Vec::new());
        }

        // An unreadable root is an error, not an empty folder
        std::fs::read_dir(&root)?;

        let date_str = date.to_string();
        let mut entries = Vec::new();

        for entry in WalkDir::new(&root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_dir() || !is_dated_markdown(entry.path(), &date_str) {
                continue;
            }

            // Symlinks count as their target, size included
            let metadata = match std::fs::metadata(entry.path()) {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!("Skipping {}: {}", entry.path().display(), e);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }
            let size = metadata.len();

            entries.push(FileEntry {
                path: entry.path().to_string_lossy().into_owned(),
                size,
                name: entry.file_name().to_string_lossy().into_owned(),
            });
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        info!(
            "Found {} file(s) for {} in {}",
            entries.len(),
            date_str,
            root.display()
        );
        Ok(entries)
    }
}

/// Whether `path` is a markdown file whose name contains `date`
fn is_dated_markdown(path: &Path, date: &str) -> bool {
    let is_markdown = path
        .extension()
        .map(|ext| ext == MARKDOWN_EXTENSION)
        .unwrap_or(false);
    let name_matches = path
        .file_name()
        .map(|name| name.to_string_lossy().contains(date))
        .unwrap_or(false);
    is_markdown && name_matches
}
