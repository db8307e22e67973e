use crate::artifacts::objects::commit::Commit;
use derive_new::new;
use std::fmt;

/// One commit as `log` prints it, trailing blank line included.
#[derive(new)]
pub struct LogEntry<'c> {
    commit: &'c Commit,
}

impl fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===")?;
        writeln!(f, "commit {}", self.commit.oid())?;

        if let (Some(parent), Some(second_parent)) =
            (self.commit.parent(), self.commit.second_parent())
        {
            writeln!(
                f,
                "Merge: {} {}",
                parent.to_short_oid(),
                second_parent.to_short_oid()
            )?;
        }

        writeln!(f, "Date: {}", self.commit.readable_timestamp())?;
        writeln!(f, "{}", self.commit.message())?;
        writeln!(f)
    }
}
