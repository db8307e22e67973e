use crate::common::command::{
    commit_file, commit_removal, read_branch_tip, run_twig_command, twig_checkout, twig_merge,
};
use crate::common::file::read_file;
use crate::merge::split_repository_dir;
use assert_fs::TempDir;
use rstest::rstest;

fn stdout_of(dir: &std::path::Path, args: &[&str]) -> String {
    let output = run_twig_command(dir, args)
        .output()
        .expect("Failed to run twig");

    String::from_utf8(output.stdout).expect("output is utf-8")
}

#[rstest]
fn change_on_the_given_branch_is_taken(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_file(dir, "f.txt", "b", "Change f.txt on other");
    let other = read_branch_tip(dir, "other");
    twig_checkout(dir, "master");
    commit_file(dir, "x.txt", "x", "Unrelated work on master");
    let master = read_branch_tip(dir, "master");

    twig_merge(dir, "other").assert().success().stdout("");

    assert_eq!(read_file(&dir.join("f.txt")), "b");
    assert_eq!(read_file(&dir.join("x.txt")), "x");

    let log = stdout_of(dir, &["log"]);
    assert!(log.contains(&format!("Merge: {} {}\n", &master[..7], &other[..7])));
    assert!(log.contains("Merged other into master.\n"));

    let status = stdout_of(dir, &["status"]);
    assert!(status.contains("=== Staged Files ===\n\n=== Removed Files ===\n\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));
}

#[rstest]
fn change_on_the_current_branch_is_kept(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_file(dir, "y.txt", "y", "Unrelated work on other");
    twig_checkout(dir, "master");
    commit_file(dir, "f.txt", "c", "Change f.txt on master");

    twig_merge(dir, "other").assert().success().stdout("");

    assert_eq!(read_file(&dir.join("f.txt")), "c");
    assert_eq!(read_file(&dir.join("y.txt")), "y");
}

#[rstest]
fn identical_changes_on_both_branches_merge_cleanly(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_file(dir, "f.txt", "same", "Change f.txt on other");
    twig_checkout(dir, "master");
    commit_file(dir, "f.txt", "same", "Change f.txt on master");

    twig_merge(dir, "other").assert().success().stdout("");

    assert_eq!(read_file(&dir.join("f.txt")), "same");
}

#[rstest]
fn deletion_on_the_given_branch_is_propagated(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_removal(dir, "f.txt", "Remove f.txt on other");
    twig_checkout(dir, "master");
    commit_file(dir, "x.txt", "x", "Unrelated work on master");

    twig_merge(dir, "other").assert().success().stdout("");

    assert!(!dir.join("f.txt").exists());
    run_twig_command(dir, &["checkout", "--", "f.txt"])
        .assert()
        .failure()
        .stdout("File does not exist in that commit.\n");
}

#[rstest]
fn deletion_on_the_current_branch_stays_deleted(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_file(dir, "y.txt", "y", "Unrelated work on other");
    twig_checkout(dir, "master");
    commit_removal(dir, "f.txt", "Remove f.txt on master");

    twig_merge(dir, "other").assert().success().stdout("");

    assert!(!dir.join("f.txt").exists());
    assert_eq!(read_file(&dir.join("y.txt")), "y");
}

#[rstest]
fn merged_history_is_visible_to_the_next_merge(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_file(dir, "f.txt", "b", "Change f.txt on other");
    twig_checkout(dir, "master");
    commit_file(dir, "x.txt", "x", "Unrelated work on master");
    twig_merge(dir, "other").assert().success();

    twig_checkout(dir, "other");
    commit_file(dir, "f.txt", "c", "Change f.txt again on other");
    twig_checkout(dir, "master");

    // the previous merge made other's first change the split point
    twig_merge(dir, "other").assert().success().stdout("");

    assert_eq!(read_file(&dir.join("f.txt")), "c");
}
