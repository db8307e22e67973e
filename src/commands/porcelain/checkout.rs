use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::errors::TwigError;

impl Repository {
    /// Restore one file from HEAD, or from the commit `revision` resolves to.
    pub fn checkout_file(&mut self, revision: Option<&str>, file: &str) -> anyhow::Result<()> {
        let path = self.workspace().relative_path(file)?;
        let commit = match revision {
            Some(revision) => {
                let oid = self.resolve_commit(revision)?;
                self.database().parse_commit(&oid)?
            }
            None => self.head_commit()?,
        };

        let content = commit
            .content(&path)
            .ok_or(TwigError::FileNotInCommit)?;
        self.workspace().write_file(&path, content)?;
        tracing::debug!(path = %path.display(), commit = %commit.oid(), "restored file");

        self.index_mut().drop_addition(&path);
        self.index_mut().write_updates()
    }

    /// Make `branch` current and replace the working files with its tip's.
    pub fn checkout_branch(&mut self, branch: &str) -> anyhow::Result<()> {
        let branch = self
            .refs()
            .lookup_branch(branch)
            .ok_or(TwigError::NoSuchBranch)?;
        if self.refs().is_current_branch(&branch)? {
            return Err(TwigError::AlreadyOnBranch.into());
        }

        let target_oid = self
            .refs()
            .read_branch(&branch)?
            .ok_or(TwigError::NoSuchBranch)?;
        let head = self.head_commit()?;
        let target = self.database().parse_commit(&target_oid)?;

        Migration::new(self, head.tracked(), target.tracked()).apply_changes()?;

        self.index_mut().clear();
        self.index_mut().write_updates()?;
        self.refs().set_current_branch(&branch)?;

        Ok(())
    }
}
