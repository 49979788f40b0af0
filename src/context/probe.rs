// Read-only view of one directory
//
// Detectors only ever ask two questions: does this name exist here, and does
// any file here match a glob. No recursion, no writes.

use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DirProbe {
    dir: PathBuf,
}

impl DirProbe {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Final path component, used to name things after the project
    pub fn dir_name(&self) -> String {
        self.dir
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("app")
            .to_string()
    }

    /// True if a file or directory named `name` exists directly in the dir
    pub fn exists(&self, name: &str) -> bool {
        self.dir.join(name).exists()
    }

    /// True if any file directly in the directory matches `pattern`
    ///
    /// Shell glob syntax (`*`, `?`, `[...]`). An invalid pattern or an
    /// unreadable directory counts as no match.
    pub fn has_match(&self, pattern: &str) -> bool {
        let glob = match Pattern::new(pattern) {
            Ok(glob) => glob,
            Err(e) => {
                debug!(pattern, error = %e, "invalid glob");
                return false;
            }
        };

        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %self.dir.display(), error = %e, "directory not readable");
                return false;
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .any(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(|name| glob.matches(name))
                    .unwrap_or(false)
            })
    }
}
