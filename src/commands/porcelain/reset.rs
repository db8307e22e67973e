use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Check out every file of the commit `revision` resolves to and move
    /// the current branch there.
    pub fn reset(&mut self, revision: &str) -> anyhow::Result<()> {
        let target_oid = self.resolve_commit(revision)?;
        let head = self.head_commit()?;
        let target = self.database().parse_commit(&target_oid)?;

        Migration::new(self, head.tracked(), target.tracked()).apply_changes()?;

        self.index_mut().clear();
        self.index_mut().write_updates()?;
        self.refs().update_head(&target_oid)?;

        Ok(())
    }
}
