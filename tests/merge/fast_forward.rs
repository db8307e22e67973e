use crate::common::command::{
    commit_file, commit_removal, count_log_entries, read_branch_tip, twig_checkout, twig_merge,
};
use crate::common::file::{FileSpec, read_file, write_file};
use crate::merge::split_repository_dir;
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn merging_a_descendant_fast_forwards(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_file(dir, "f.txt", "b", "Change f.txt on other");
    commit_file(dir, "new.txt", "new", "Add new.txt on other");
    let other = read_branch_tip(dir, "other");
    twig_checkout(dir, "master");
    write_file(FileSpec::new(dir.join("stray.txt"), "untracked".to_string()));
    let entries_before = count_log_entries(dir);

    twig_merge(dir, "other")
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(read_branch_tip(dir, "master"), other);
    assert_eq!(read_file(&dir.join("f.txt")), "b");
    assert_eq!(read_file(&dir.join("new.txt")), "new");
    assert!(!dir.join("stray.txt").exists());
    // no merge commit, only the two commits of other
    assert_eq!(count_log_entries(dir), entries_before + 2);
}

#[rstest]
fn fast_forward_clears_untracked_files_in_nested_directories(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_file(dir, "f.txt", "b", "Change f.txt on other");
    twig_checkout(dir, "master");
    write_file(FileSpec::new(dir.join("scratch").join("stray.txt"), "stray".to_string()));

    twig_merge(dir, "other")
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert!(!dir.join("scratch").exists());
    assert_eq!(read_file(&dir.join("1.txt")), "one");
    assert_eq!(read_file(&dir.join("a").join("2.txt")), "two");
}

#[rstest]
fn fast_forward_removes_files_the_given_branch_dropped(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_removal(dir, "f.txt", "Remove f.txt on other");
    twig_checkout(dir, "master");

    twig_merge(dir, "other").assert().success();

    assert!(!dir.join("f.txt").exists());
}
