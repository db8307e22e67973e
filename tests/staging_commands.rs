use crate::common::command::{init_repository_dir, run_twig_command, twig_add};
use crate::common::file::{FileSpec, delete_path, write_file, write_generated_files};
use assert_fs::TempDir;
use rstest::rstest;

mod common;

fn status_output(dir: &std::path::Path) -> String {
    let output = run_twig_command(dir, &["status"])
        .output()
        .expect("Failed to run status");
    assert!(output.status.success());

    String::from_utf8(output.stdout).expect("status output is utf-8")
}

#[rstest]
fn status_reports_every_section(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();

    write_file(FileSpec::new(dir.join("new.txt"), "new".to_string()));
    twig_add(dir, &["new.txt"]);
    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    delete_path(&dir.join("a").join("2.txt"));
    write_file(FileSpec::new(dir.join("junk.txt"), "junk".to_string()));

    pretty_assertions::assert_eq!(
        status_output(dir),
        "=== Branches ===\n\
         *master\n\
         other\n\
         \n\
         === Staged Files ===\n\
         new.txt\n\
         \n\
         === Removed Files ===\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         1.txt (modified)\n\
         a/2.txt (deleted)\n\
         \n\
         === Untracked Files ===\n\
         junk.txt\n\
         \n"
    );
}

#[rstest]
fn clean_repository_has_empty_sections(init_repository_dir: TempDir) {
    pretty_assertions::assert_eq!(
        status_output(init_repository_dir.path()),
        "=== Branches ===\n*master\n\n\
         === Staged Files ===\n\n\
         === Removed Files ===\n\n\
         === Modifications Not Staged For Commit ===\n\n\
         === Untracked Files ===\n\n"
    );
}

#[rstest]
fn staged_files_changed_afterwards_are_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("x.txt"), "x".to_string()));
    write_file(FileSpec::new(dir.join("y.txt"), "y".to_string()));
    twig_add(dir, &["x.txt", "y.txt"]);

    write_file(FileSpec::new(dir.join("x.txt"), "x again".to_string()));
    delete_path(&dir.join("y.txt"));

    let status = status_output(dir);
    assert!(status.contains(
        "=== Modifications Not Staged For Commit ===\nx.txt (modified)\ny.txt (deleted)\n\n"
    ));
}

#[rstest]
fn adding_generated_files_stages_all_of_them(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let files = write_generated_files(dir, 4);

    for file in &files {
        let name = file.path.file_name().unwrap().to_string_lossy().to_string();
        twig_add(dir, &[&name]);
    }

    let status = status_output(dir);
    for file in &files {
        let name = file.path.file_name().unwrap().to_string_lossy().to_string();
        assert!(status.contains(&format!("{name}\n")));
    }
    assert!(status.ends_with("=== Untracked Files ===\n\n"));
}

#[rstest]
fn adding_an_unchanged_file_stages_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    twig_add(dir, &["1.txt"]);
    twig_add(dir, &["1.txt"]);

    assert!(status_output(dir).contains("=== Staged Files ===\n\n"));
}

#[rstest]
fn adding_a_file_reverted_to_head_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "edited".to_string()));
    twig_add(dir, &["1.txt"]);
    assert!(status_output(dir).contains("=== Staged Files ===\n1.txt\n\n"));

    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    twig_add(dir, &["1.txt"]);

    assert!(status_output(dir).contains("=== Staged Files ===\n\n"));
}

#[rstest]
fn adding_a_missing_file_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["add", "ghost.txt"])
        .assert()
        .failure()
        .stdout("File does not exist.\n");
}

#[rstest]
fn adding_a_path_outside_the_repository_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));

    run_twig_command(dir, &["add", "../1.txt"])
        .assert()
        .failure()
        .stdout("File does not exist.\n");

    assert!(status_output(dir).contains("=== Staged Files ===\n\n"));
}

#[rstest]
fn adding_a_tracked_file_deleted_by_hand_stages_its_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    delete_path(&dir.join("1.txt"));

    twig_add(dir, &["1.txt"]);

    assert!(status_output(dir).contains("=== Removed Files ===\n1.txt\n\n"));
}

#[rstest]
fn removing_a_tracked_file_deletes_it_and_stages_the_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["rm", "a/2.txt"]).assert().success();

    assert!(!dir.join("a").join("2.txt").exists());
    let status = status_output(dir);
    assert!(status.contains("=== Removed Files ===\na/2.txt\n\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));
}

#[rstest]
fn adding_a_removed_file_back_cancels_the_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["rm", "1.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    assert!(status_output(dir).contains("=== Untracked Files ===\n1.txt\n\n"));

    twig_add(dir, &["1.txt"]);

    let status = status_output(dir);
    assert!(status.contains("=== Removed Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\n\n"));
}

#[rstest]
fn removing_a_staged_new_file_keeps_it_on_disk(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("new.txt"), "new".to_string()));
    twig_add(dir, &["new.txt"]);

    run_twig_command(dir, &["rm", "new.txt"]).assert().success();

    assert!(dir.join("new.txt").is_file());
    let status = status_output(dir);
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\nnew.txt\n\n"));
}

#[rstest]
fn removing_an_unknown_file_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("junk.txt"), "junk".to_string()));

    run_twig_command(dir, &["rm", "junk.txt"])
        .assert()
        .failure()
        .stdout("No reason to remove the file.\n");

    assert!(dir.join("junk.txt").is_file());
}

#[rstest]
#[case::add(&["add"])]
#[case::rm(&["rm"])]
fn missing_operands_are_rejected(init_repository_dir: TempDir, #[case] args: &[&str]) {
    run_twig_command(init_repository_dir.path(), args)
        .assert()
        .failure()
        .stdout("Incorrect operands.\n");
}
