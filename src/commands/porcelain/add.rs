use crate::areas::index::StageOutcome;
use crate::areas::repository::Repository;
use crate::errors::TwigError;

impl Repository {
    pub fn add(&mut self, file: &str) -> anyhow::Result<()> {
        let path = self.workspace().relative_path(file)?;
        let head = self.head_commit()?;

        match self.workspace().try_read_file(&path)? {
            Some(content) => {
                let outcome = self.index_mut().stage(&path, content, head.tracked());
                if outcome == StageOutcome::MatchesHead {
                    tracing::debug!(path = %path.display(), "unchanged since HEAD");
                }
            }
            // a tracked file deleted by hand is staged for removal
            None => match head.content(&path) {
                Some(prior_content) => {
                    if !self.index().is_staged_for_removal(&path) {
                        self.index_mut().stage_removal(&path, prior_content.clone());
                    }
                }
                None => return Err(TwigError::FileNotFound.into()),
            },
        }

        self.index_mut().write_updates()
    }
}
