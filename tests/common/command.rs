use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with `1.txt` ("one") and `a/2.txt` ("two") committed on
/// `master` as "Initial commit".
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));

    twig_add(repository_dir.path(), &["1.txt", "a/2.txt"]);
    twig_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_add(dir: &Path, files: &[&str]) {
    for file in files {
        run_twig_command(dir, &["add", file]).assert().success();
    }
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    run_twig_command(dir, &["commit", message])
}

pub fn twig_merge(dir: &Path, branch: &str) -> Command {
    run_twig_command(dir, &["merge", branch])
}

pub fn twig_checkout(dir: &Path, branch: &str) {
    run_twig_command(dir, &["checkout", branch])
        .assert()
        .success();
}

/// Write a file, stage it and commit it on the current branch.
pub fn commit_file(dir: &Path, file: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(file), content.to_string()));
    twig_add(dir, &[file]);
    twig_commit(dir, message).assert().success();
}

/// Stage the removal of a file and commit it on the current branch.
pub fn commit_removal(dir: &Path, file: &str, message: &str) {
    run_twig_command(dir, &["rm", file]).assert().success();
    twig_commit(dir, message).assert().success();
}

pub fn read_branch_tip(dir: &Path, branch: &str) -> String {
    let ref_path = dir.join(".twig").join("refs").join("heads").join(branch);
    std::fs::read_to_string(&ref_path)
        .unwrap_or_else(|e| panic!("Failed to read branch {:?}: {}", ref_path, e))
        .trim()
        .to_string()
}

pub fn count_log_entries(dir: &Path) -> usize {
    let output = run_twig_command(dir, &["log"])
        .output()
        .expect("Failed to run log");

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| *line == "===")
        .count()
}
