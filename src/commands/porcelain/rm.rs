use crate::areas::index::UnstageOutcome;
use crate::areas::repository::Repository;

impl Repository {
    pub fn rm(&mut self, file: &str) -> anyhow::Result<()> {
        let path = self.workspace().relative_path(file)?;
        let head = self.head_commit()?;

        let outcome = self.index_mut().unstage(&path, head.tracked())?;
        if outcome == UnstageOutcome::RemovalStaged {
            self.workspace().remove_file(&path)?;
        }

        self.index_mut().write_updates()
    }
}
