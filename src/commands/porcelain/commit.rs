use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use std::io::Write;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let commit = self.write_commit(message, None)?;
        let branch = self.refs().current_branch()?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            branch,
            commit.oid().to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }

    /// Record HEAD's files with the staged changes applied, advance the
    /// current branch and clear staging.
    ///
    /// Merge commits (with a second parent) may have nothing staged.
    pub(crate) fn write_commit(
        &mut self,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<Commit> {
        if message.trim().is_empty() {
            return Err(TwigError::EmptyMessage.into());
        }
        if second_parent.is_none() && self.index().is_empty() {
            return Err(TwigError::NoChanges.into());
        }

        let head = self.head_commit()?;
        let tracked = self.index().apply_to(head.tracked());
        let commit = Commit::create(
            message.to_string(),
            Some(head.oid().clone()),
            tracked,
            second_parent,
        )?;

        // the object is complete before any pointer moves
        self.database().store(&commit)?;
        self.refs().update_head(commit.oid())?;

        self.index_mut().clear();
        self.index_mut().write_updates()?;

        Ok(commit)
    }
}
