use crate::areas::repository::Repository;
use crate::artifacts::log::ancestors::Ancestors;
use crate::artifacts::log::log_entry::LogEntry;
use crate::artifacts::objects::commit::Commit;
use crate::errors::TwigError;
use std::io::Write;

impl Repository {
    pub fn log(&self) -> anyhow::Result<()> {
        for commit in Ancestors::new(self.database(), self.refs().read_head()?) {
            self.display_commit(&commit?)?;
        }

        Ok(())
    }

    pub fn global_log(&self) -> anyhow::Result<()> {
        for oid in self.database().list_commits()? {
            let commit = self.database().parse_commit(&oid)?;
            self.display_commit(&commit)?;
        }

        Ok(())
    }

    /// Print the id of every commit whose message is exactly `message`.
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for oid in self.database().list_commits()? {
            let commit = self.database().parse_commit(&oid)?;
            if commit.message() == message {
                writeln!(self.writer(), "{}", commit.oid())?;
                found = true;
            }
        }

        if !found {
            return Err(TwigError::NoCommitWithMessage.into());
        }

        Ok(())
    }

    fn display_commit(&self, commit: &Commit) -> anyhow::Result<()> {
        write!(self.writer(), "{}", LogEntry::new(commit))?;
        Ok(())
    }
}
