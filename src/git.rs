// Git plumbing for `aura git commit`
//
// Every call shells out to the `git` binary in a given working directory.
// A non-zero exit becomes an I/O error carrying git's stderr.

use crate::context::executor;
use crate::error::{AuraError, Result};
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::process::Command;
use tracing::debug;

static EDIT_COUNTER: AtomicU32 = AtomicU32::new(0);

async fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    debug!(args = ?args, "running git");
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AuraError::Io(io::Error::other(format!(
            "git {} failed: {}",
            args.join(" "),
            stderr.trim()
        ))));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Fails unless `dir` is inside a git work tree
pub async fn ensure_repository(dir: &Path) -> Result<()> {
    run_git(dir, &["rev-parse", "--git-dir"])
        .await
        .map(|_| ())
        .map_err(|e| AuraError::Io(io::Error::other(format!("not a git repository ({})", e))))
}

/// The staged changes as a unified diff. Empty when nothing is staged.
pub async fn staged_diff(dir: &Path) -> Result<String> {
    run_git(dir, &["diff", "--staged"]).await
}

pub async fn commit(dir: &Path, message: &str) -> Result<()> {
    run_git(dir, &["commit", "-m", message]).await?;
    Ok(())
}

/// Let the user edit `initial` in `editor` and return the trimmed result
///
/// The editor command is split on whitespace like an action, so values such
/// as `code --wait` work. The temporary file is removed afterwards.
pub async fn edit_message(editor: &str, initial: &str) -> Result<String> {
    let (program, mut args) = executor::tokenize(editor)?;
    let file = std::env::temp_dir().join(format!(
        "aura-commit-{}-{}.txt",
        std::process::id(),
        EDIT_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    tokio::fs::write(&file, initial).await?;
    args.push(file.to_string_lossy().into_owned());

    let status = Command::new(&program)
        .args(&args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await;

    let edited = tokio::fs::read_to_string(&file).await;
    let _ = tokio::fs::remove_file(&file).await;

    let status = status?;
    if !status.success() {
        return Err(AuraError::Io(io::Error::other(format!(
            "editor '{}' exited with {}",
            program, status
        ))));
    }

    Ok(edited?.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[tokio::test]
    async fn test_outside_repository_fails() {
        let temp = TempDir::new().unwrap();
        let result = ensure_repository(temp.path()).await;
        assert!(matches!(result, Err(AuraError::Io(_))));
    }

    #[tokio::test]
    async fn test_staged_diff() {
        if !git_available().await {
            return;
        }
        let temp = TempDir::new().unwrap();
        run_git(temp.path(), &["init", "-q"]).await.unwrap();
        ensure_repository(temp.path()).await.unwrap();
        assert!(staged_diff(temp.path()).await.unwrap().trim().is_empty());

        std::fs::write(temp.path().join("notes.txt"), "hello\n").unwrap();
        run_git(temp.path(), &["add", "notes.txt"]).await.unwrap();

        let diff = staged_diff(temp.path()).await.unwrap();
        assert!(diff.contains("notes.txt"));
        assert!(diff.contains("+hello"));
    }

    #[tokio::test]
    async fn test_empty_editor_rejected() {
        assert!(matches!(
            edit_message("  ", "msg").await,
            Err(AuraError::EmptyCommand)
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_edit_with_noop_editor_keeps_message() {
        // `true` exits without touching the file
        let edited = edit_message("true", "  feat: keep me\n").await.unwrap();
        assert_eq!(edited, "feat: keep me");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_editor_is_error() {
        assert!(matches!(
            edit_message("false", "msg").await,
            Err(AuraError::Io(_))
        ));
    }
}
