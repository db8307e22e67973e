use crate::common::command::{
    commit_file, read_branch_tip, run_twig_command, twig_add, twig_checkout, twig_merge,
};
use crate::common::file::{FileSpec, write_file};
use crate::merge::split_repository_dir;
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn merging_an_unknown_branch_fails(split_repository_dir: TempDir) {
    twig_merge(split_repository_dir.path(), "ghost")
        .assert()
        .failure()
        .stdout("A branch with that name does not exist.\n");
}

#[rstest]
fn merging_the_current_branch_fails(split_repository_dir: TempDir) {
    twig_merge(split_repository_dir.path(), "master")
        .assert()
        .failure()
        .stdout("Cannot merge a branch with itself.\n");
}

#[rstest]
fn merging_with_staged_changes_fails(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_file(dir, "f.txt", "b", "Change f.txt on other");
    twig_checkout(dir, "master");
    write_file(FileSpec::new(dir.join("pending.txt"), "pending".to_string()));
    twig_add(dir, &["pending.txt"]);
    let master = read_branch_tip(dir, "master");
    let other = read_branch_tip(dir, "other");

    twig_merge(dir, "other")
        .assert()
        .failure()
        .stdout("You have uncommitted changes.\n");

    assert_eq!(read_branch_tip(dir, "master"), master);
    assert_eq!(read_branch_tip(dir, "other"), other);
}

#[rstest]
fn merging_an_ancestor_changes_nothing(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    commit_file(dir, "g.txt", "g", "Ahead on master");
    let master = read_branch_tip(dir, "master");

    twig_merge(dir, "other")
        .assert()
        .failure()
        .stdout("Given branch is an ancestor of the current branch.\n");

    assert_eq!(read_branch_tip(dir, "master"), master);
}

#[rstest]
fn missing_branch_operand_is_rejected(split_repository_dir: TempDir) {
    run_twig_command(split_repository_dir.path(), &["merge"])
        .assert()
        .failure()
        .stdout("Incorrect operands.\n");
}
