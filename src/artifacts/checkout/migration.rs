//! Replace the files of one commit with those of another
//!
//! Planning rules:
//! - a file tracked by the source but not the target is deleted
//! - a file tracked by both is rewritten when the working copy differs
//! - a file only tracked by the target is added, unless an untracked working
//!   file with different content already sits at that path
//!
//! Untracked files the target does not mention are left alone.

use crate::areas::repository::Repository;
use crate::artifacts::checkout::conflict::UntrackedGuard;
use crate::artifacts::objects::commit::TrackedFiles;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionType {
    Add,
    Delete,
    Modify,
}

/// Planned writes grouped by kind; deletions carry no content.
pub type ActionsSet = HashMap<ActionType, Vec<(PathBuf, Option<Bytes>)>>;

pub struct Migration<'r> {
    repository: &'r Repository,
    source: &'r TrackedFiles,
    target: &'r TrackedFiles,
    actions: ActionsSet,
}

impl<'r> Migration<'r> {
    pub fn new(
        repository: &'r Repository,
        source: &'r TrackedFiles,
        target: &'r TrackedFiles,
    ) -> Self {
        let actions = HashMap::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        Self {
            repository,
            source,
            target,
            actions,
        }
    }

    pub fn actions(&self) -> &ActionsSet {
        &self.actions
    }

    pub fn apply_changes(&mut self) -> anyhow::Result<()> {
        self.plan_changes()?;
        self.repository.workspace().apply_migration(self)?;

        tracing::debug!(
            added = self.actions[&ActionType::Add].len(),
            modified = self.actions[&ActionType::Modify].len(),
            deleted = self.actions[&ActionType::Delete].len(),
            "migration applied"
        );

        Ok(())
    }

    fn plan_changes(&mut self) -> anyhow::Result<()> {
        let (repository, source, target) = (self.repository, self.source, self.target);
        let workspace = repository.workspace();
        let mut guard = UntrackedGuard::new(workspace, source);

        for path in source.keys() {
            if !target.contains_key(path) && workspace.exists(path) {
                self.record_change(ActionType::Delete, path.clone(), None);
            }
        }

        for (path, content) in target {
            if source.contains_key(path) {
                if workspace.try_read_file(path)?.as_ref() != Some(content) {
                    self.record_change(ActionType::Modify, path.clone(), Some(content.clone()));
                }
            } else {
                guard.check(path, content)?;
                self.record_change(ActionType::Add, path.clone(), Some(content.clone()));
            }
        }

        guard.verify()
    }

    fn record_change(&mut self, action: ActionType, path: PathBuf, content: Option<Bytes>) {
        self.actions.entry(action).or_default().push((path, content));
    }
}
