use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{FileSet, Status, StatusInfo};
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let status = Status::new(self).initialize()?;

        self.print_branches(&status)?;
        self.print_section("Staged Files", Self::display_paths(status.staged_files()))?;
        self.print_section("Removed Files", Self::display_paths(status.removed_files()))?;
        self.print_section(
            "Modifications Not Staged For Commit",
            status
                .workspace_changeset()
                .iter()
                .map(|(path, change)| format!("{} {}", path.display(), change)),
        )?;
        self.print_section(
            "Untracked Files",
            Self::display_paths(status.untracked_files()),
        )?;

        Ok(())
    }

    fn print_branches(&self, status: &StatusInfo) -> anyhow::Result<()> {
        let branches = status.branches().iter().map(|branch| {
            if branch == status.current_branch() {
                format!("*{branch}").green().to_string()
            } else {
                branch.to_string()
            }
        });

        self.print_section("Branches", branches)
    }

    fn print_section(
        &self,
        title: &str,
        lines: impl Iterator<Item = String>,
    ) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "=== {title} ===")?;
        for line in lines {
            writeln!(writer, "{line}")?;
        }
        writeln!(writer)?;

        Ok(())
    }

    fn display_paths(files: &FileSet) -> impl Iterator<Item = String> + '_ {
        files.iter().map(|path| path.display().to_string())
    }
}
