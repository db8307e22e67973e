use crate::common::command::{commit_file, init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use rstest::fixture;

mod clean_merges;
mod conflicts;
mod fast_forward;
mod preconditions;

/// `f.txt` ("a") committed on `master`, with `other` branched off right
/// after, so that commit is the split point of both branches.
#[fixture]
pub fn split_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    commit_file(dir, "f.txt", "a", "Add f.txt");
    run_twig_command(dir, &["branch", "other"])
        .assert()
        .success();

    init_repository_dir
}
