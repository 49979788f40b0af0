#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn aura(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aura").unwrap();
    cmd.current_dir(dir.path())
        .env("AURA_DB_PATH", dir.path().join("data").join("aura.db"))
        .env_remove("AURA_DB_MODE")
        .env_remove("AURA_ENV")
        .env_remove("AURA_HISTORY_LIMIT")
        .env_remove("AURA_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

fn make_dir(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::create_dir_all(&path).unwrap();
    path
}

fn add(dir: &TempDir, alias: &str, path: &PathBuf) {
    aura(dir)
        .args(["bookmark", "add", alias])
        .arg(path)
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// aura bookmark
// ---------------------------------------------------------------------------

#[test]
fn list_empty_store() {
    let dir = TempDir::new().unwrap();
    aura(&dir)
        .args(["bookmark", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No bookmarks found"));
}

#[test]
fn add_then_list() {
    let dir = TempDir::new().unwrap();
    let proj = make_dir(&dir, "proj");
    add(&dir, "proj", &proj);

    aura(&dir)
        .args(["bookmark", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("proj -> {}", proj.display())));
}

#[test]
fn add_this_as_uses_current_directory() {
    let dir = TempDir::new().unwrap();
    let work = make_dir(&dir, "work");

    aura(&dir)
        .current_dir(&work)
        .args(["bookmark", "add", "this", "as", "work"])
        .assert()
        .success();

    aura(&dir)
        .args(["go", "work"])
        .assert()
        .success()
        .stdout(predicate::eq(work.display().to_string()));
}

#[test]
fn add_relative_path_is_normalized() {
    let dir = TempDir::new().unwrap();
    let docs = make_dir(&dir, "docs");

    aura(&dir)
        .args(["bookmark", "add", "docs", "./docs/../docs"])
        .assert()
        .success()
        .stdout(predicate::str::contains(docs.display().to_string()));
}

#[test]
fn add_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    aura(&dir)
        .args(["bookmark", "add", "ghost", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn add_existing_alias_replaces_with_warning() {
    let dir = TempDir::new().unwrap();
    let old = make_dir(&dir, "old");
    let new = make_dir(&dir, "new");
    add(&dir, "proj", &old);

    aura(&dir)
        .args(["bookmark", "add", "proj"])
        .arg(&new)
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));

    aura(&dir)
        .args(["go", "proj"])
        .assert()
        .success()
        .stdout(predicate::eq(new.display().to_string()));
}

#[test]
fn remove_missing_alias_fails() {
    let dir = TempDir::new().unwrap();
    aura(&dir)
        .args(["bookmark", "remove", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn remove_then_list() {
    let dir = TempDir::new().unwrap();
    let tmp = make_dir(&dir, "tmp");
    add(&dir, "tmp", &tmp);

    aura(&dir)
        .args(["bookmark", "remove", "tmp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bookmark 'tmp' removed"));

    aura(&dir)
        .args(["bookmark", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No bookmarks found"));
}

// ---------------------------------------------------------------------------
// aura go
// ---------------------------------------------------------------------------

#[test]
fn go_prints_only_the_path() {
    let dir = TempDir::new().unwrap();
    let api = make_dir(&dir, "services/api");
    add(&dir, "api", &api);

    aura(&dir)
        .args(["go", "api"])
        .assert()
        .success()
        .stdout(predicate::eq(api.display().to_string()));
}

#[test]
fn go_fuzzy_single_match() {
    let dir = TempDir::new().unwrap();
    let docs = make_dir(&dir, "documents");
    add(&dir, "docs", &docs);

    aura(&dir)
        .args(["go", "DOC"])
        .assert()
        .success()
        .stdout(predicate::eq(docs.display().to_string()));
}

#[test]
fn go_ambiguous_lists_candidates_on_stderr() {
    let dir = TempDir::new().unwrap();
    add(&dir, "web-a", &make_dir(&dir, "a"));
    add(&dir, "web-b", &make_dir(&dir, "b"));

    aura(&dir)
        .args(["go", "web"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Multiple matches found for 'web'"))
        .stderr(predicate::str::contains("web-a ->"))
        .stderr(predicate::str::contains("Please be more specific."));
}

#[test]
fn go_no_match_fails() {
    let dir = TempDir::new().unwrap();
    aura(&dir)
        .args(["go", "nowhere"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No bookmarks found matching 'nowhere'"));
}

#[test]
fn go_falls_back_to_history() {
    let dir = TempDir::new().unwrap();
    let reports = make_dir(&dir, "quarterly-reports");
    add(&dir, "reports", &reports);

    // Visiting records history; removing the bookmark leaves it behind
    aura(&dir).args(["go", "reports"]).assert().success();
    aura(&dir).args(["bookmark", "remove", "reports"]).assert().success();

    aura(&dir)
        .args(["go", "quarterly"])
        .assert()
        .success()
        .stdout(predicate::eq(reports.display().to_string()));
}

#[test]
fn go_stale_bookmark_fails() {
    let dir = TempDir::new().unwrap();
    let gone = make_dir(&dir, "gone");
    add(&dir, "gone", &gone);
    fs::remove_dir(&gone).unwrap();

    aura(&dir)
        .args(["go", "gone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no longer exists"));
}

// ---------------------------------------------------------------------------
// aura do / ask / config
// ---------------------------------------------------------------------------

#[test]
fn do_list_in_empty_directory_shows_general_actions() {
    let dir = TempDir::new().unwrap();
    let empty = make_dir(&dir, "empty");

    aura(&dir)
        .current_dir(&empty)
        .args(["do", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Open current directory"))
        .stdout(predicate::str::contains("Find large files"))
        .stdout(predicate::str::contains("git status").not());
}

#[test]
fn do_list_in_git_repo() {
    let dir = TempDir::new().unwrap();
    let repo = make_dir(&dir, "repo");
    fs::create_dir(repo.join(".git")).unwrap();

    aura(&dir)
        .current_dir(&repo)
        .args(["do", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("git status"))
        .stdout(predicate::str::contains("List directory contents"));
}

#[test]
fn ask_without_key_is_config_error() {
    let dir = TempDir::new().unwrap();
    aura(&dir)
        .env_remove("AURA_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .args(["ask", "how", "do", "I", "list", "files"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("AURA_API_KEY"));
}

// ---------------------------------------------------------------------------
// aura git commit
// ---------------------------------------------------------------------------

fn git(dir: &TempDir, args: &[&str]) -> bool {
    std::process::Command::new("git")
        .args(args)
        .current_dir(dir.path())
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[test]
fn commit_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    aura(&dir)
        .args(["git", "commit"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn commit_with_nothing_staged() {
    let dir = TempDir::new().unwrap();
    if !git(&dir, &["init", "-q"]) {
        return;
    }

    aura(&dir)
        .args(["git", "commit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No staged changes found"));
}

#[test]
fn commit_without_key_is_config_error() {
    let dir = TempDir::new().unwrap();
    if !git(&dir, &["init", "-q"]) {
        return;
    }
    fs::write(dir.path().join("notes.txt"), "hello\n").unwrap();
    assert!(git(&dir, &["add", "notes.txt"]));

    aura(&dir)
        .env_remove("AURA_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .args(["git", "commit"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("AURA_API_KEY"));
}

#[test]
fn memory_mode_does_not_create_database() {
    let dir = TempDir::new().unwrap();
    aura(&dir)
        .env("AURA_DB_MODE", "memory")
        .args(["bookmark", "list"])
        .assert()
        .success();

    assert!(!dir.path().join("data").exists());
}

#[test]
fn unknown_db_mode_fails() {
    let dir = TempDir::new().unwrap();
    aura(&dir)
        .env("AURA_DB_MODE", "docker")
        .args(["bookmark", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("AURA_DB_MODE"));
}
