use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// Walks first parents only; second parents of merge commits are skipped.
pub struct Ancestors<'d> {
    database: &'d Database,
    next: Option<ObjectId>,
}

impl<'d> Ancestors<'d> {
    pub fn new(database: &'d Database, tip: ObjectId) -> Self {
        Ancestors {
            database,
            next: Some(tip),
        }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = anyhow::Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next.take()?;

        match self.database.parse_commit(&oid) {
            Ok(commit) => {
                self.next = commit.parent().cloned();
                Some(Ok(commit))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
