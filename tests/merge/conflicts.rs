use crate::common::command::{
    commit_file, commit_removal, read_branch_tip, run_twig_command, twig_checkout, twig_merge,
};
use crate::common::file::{FileSpec, read_file, write_file};
use crate::merge::split_repository_dir;
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn divergent_changes_are_committed_with_markers(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_file(dir, "f.txt", "c", "Change f.txt on other");
    twig_checkout(dir, "master");
    commit_file(dir, "f.txt", "b", "Change f.txt on master");
    let master = read_branch_tip(dir, "master");

    twig_merge(dir, "other")
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("f.txt")),
        "<<<<<<< HEAD\nb\n=======\nc\n>>>>>>>\n"
    );
    assert_ne!(read_branch_tip(dir, "master"), master);

    // the conflicted content is what the merge commit tracks
    write_file(FileSpec::new(dir.join("f.txt"), "resolved".to_string()));
    run_twig_command(dir, &["checkout", "--", "f.txt"])
        .assert()
        .success();
    assert_eq!(
        read_file(&dir.join("f.txt")),
        "<<<<<<< HEAD\nb\n=======\nc\n>>>>>>>\n"
    );
}

#[rstest]
fn modified_here_deleted_there_conflicts(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_removal(dir, "f.txt", "Remove f.txt on other");
    twig_checkout(dir, "master");
    commit_file(dir, "f.txt", "b\n", "Change f.txt on master");

    twig_merge(dir, "other")
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("f.txt")),
        "<<<<<<< HEAD\nb\n=======\n>>>>>>>\n"
    );
}

#[rstest]
fn deleted_here_modified_there_conflicts(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_file(dir, "f.txt", "c", "Change f.txt on other");
    twig_checkout(dir, "master");
    commit_removal(dir, "f.txt", "Remove f.txt on master");

    twig_merge(dir, "other")
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("f.txt")),
        "<<<<<<< HEAD\n=======\nc\n>>>>>>>\n"
    );
}

#[rstest]
fn files_added_differently_on_both_branches_conflict(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_file(dir, "n.txt", "theirs\n", "Add n.txt on other");
    twig_checkout(dir, "master");
    commit_file(dir, "n.txt", "ours\n", "Add n.txt on master");

    twig_merge(dir, "other")
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("n.txt")),
        "<<<<<<< HEAD\nours\n=======\ntheirs\n>>>>>>>\n"
    );
}

#[rstest]
fn untracked_file_in_the_way_aborts_without_changes(split_repository_dir: TempDir) {
    let dir = split_repository_dir.path();
    twig_checkout(dir, "other");
    commit_file(dir, "f.txt", "b", "Change f.txt on other");
    commit_file(dir, "new.txt", "theirs", "Add new.txt on other");
    twig_checkout(dir, "master");
    commit_file(dir, "x.txt", "x", "Unrelated work on master");
    write_file(FileSpec::new(dir.join("new.txt"), "mine".to_string()));
    let master = read_branch_tip(dir, "master");

    twig_merge(dir, "other")
        .assert()
        .failure()
        .stdout("There is an untracked file in the way; delete it or add it first.\n");

    assert_eq!(read_branch_tip(dir, "master"), master);
    assert_eq!(read_file(&dir.join("new.txt")), "mine");
    assert_eq!(read_file(&dir.join("f.txt")), "a");
}
