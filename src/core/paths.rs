// Path and alias validation for bookmarks
//
// Paths are normalized lexically (no symlink resolution) so the stored path
// is the one the user typed, just absolute and without `.`/`..` segments.

use crate::db::HISTORY_LABEL_PREFIX;
use crate::error::{AuraError, Result};
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

// No whitespace, no path separators
static ALIAS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s/\\]+$").expect("alias pattern is a valid regex")
});

/// Check an alias is usable as a bookmark key
pub fn validate_alias(alias: &str) -> Result<()> {
    if alias.is_empty() {
        return Err(AuraError::InvalidPath("alias must not be empty".to_string()));
    }
    if alias == "." || alias == ".." {
        return Err(AuraError::InvalidPath(format!("'{}' is not a valid alias", alias)));
    }
    if !ALIAS_PATTERN.is_match(alias) {
        return Err(AuraError::InvalidPath(format!(
            "alias '{}' must not contain whitespace or path separators",
            alias
        )));
    }
    if alias.starts_with(HISTORY_LABEL_PREFIX) {
        return Err(AuraError::InvalidPath(format!(
            "aliases starting with '{}' are reserved",
            HISTORY_LABEL_PREFIX
        )));
    }
    Ok(())
}

/// Expand a leading `~` to the home directory
pub fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Make `raw` absolute against `cwd` and drop `.`/`..` segments
pub fn normalize(raw: &str, cwd: &Path) -> PathBuf {
    let expanded = expand_home(raw);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            // Popping past the root is a no-op, like the shell
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// The path must exist and be a directory
pub fn ensure_directory(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(AuraError::InvalidPath(format!(
            "'{}' is not a directory",
            path.display()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AuraError::InvalidPath(
            format!("'{}' does not exist", path.display()),
        )),
        Err(e) => Err(e.into()),
    }
}
