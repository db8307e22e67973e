use crate::areas::database::CommitCache;
use crate::areas::repository::Repository;
use crate::artifacts::checkout::conflict::UntrackedGuard;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::merge::resolution::{MergePlan, Resolution};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn merge(&mut self, given: &str) -> anyhow::Result<MergeOutcome> {
        let given_branch = self
            .refs()
            .lookup_branch(given)
            .ok_or(TwigError::BranchNotFound)?;
        let current_branch = self.refs().current_branch()?;
        if given_branch == current_branch {
            return Err(TwigError::MergeWithSelf.into());
        }
        if !self.index().is_empty() {
            return Err(TwigError::UncommittedChanges.into());
        }

        let current_oid = self.refs().read_head()?;
        let given_oid = self
            .refs()
            .read_branch(&given_branch)?
            .ok_or(TwigError::BranchNotFound)?;

        let split_oid = self
            .find_split_point(&current_oid, &given_oid)?
            .ok_or(TwigError::NoSplitPoint)?;
        if split_oid == given_oid {
            return Err(TwigError::GivenIsAncestor.into());
        }

        let current = self.database().parse_commit(&current_oid)?;
        let given_commit = self.database().parse_commit(&given_oid)?;

        if split_oid == current_oid {
            Migration::new(self, current.tracked(), given_commit.tracked()).apply_changes()?;
            self.clear_untracked(given_commit.tracked())?;
            self.refs().update_head(&given_oid)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;

            return Ok(MergeOutcome::FastForward(given_oid));
        }

        let split = self.database().parse_commit(&split_oid)?;
        let plan = MergePlan::build(split.tracked(), current.tracked(), given_commit.tracked());
        self.apply_merge_plan(&plan, current.tracked())?;

        let message = format!("Merged {given_branch} into {current_branch}.");
        let merge_commit = self.write_commit(&message, Some(given_oid))?;

        let conflicted = plan.has_conflicts();
        if conflicted {
            writeln!(self.writer(), "{}", "Encountered a merge conflict.".yellow())?;
        }
        tracing::info!(oid = %merge_commit.oid(), conflicted, "merged {given_branch}");

        Ok(MergeOutcome::Merged {
            oid: merge_commit.oid().clone(),
            conflicted,
        })
    }

    fn find_split_point(
        &self,
        current: &ObjectId,
        given: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let commit_cache = CommitCache::new();
        let database = self.database();

        SplitPointFinder::new(|oid| commit_cache.get_or_load_slim_commit(database, oid))
            .find_split_point(current, given)
    }

    // a fast-forward leaves exactly the files of the given commit
    fn clear_untracked(&self, tracked: &TrackedFiles) -> anyhow::Result<()> {
        for path in self.workspace().list_files()? {
            if !tracked.contains_key(&path) {
                tracing::debug!(path = %path.display(), "removing untracked file");
                self.workspace().remove_file(&path)?;
            }
        }

        Ok(())
    }

    // Every write is checked against untracked files before anything on
    // disk changes.
    fn apply_merge_plan(&mut self, plan: &MergePlan, current: &TrackedFiles) -> anyhow::Result<()> {
        let mut guard = UntrackedGuard::new(self.workspace(), current);
        let mut writes = Vec::new();
        for (path, resolution) in plan.resolutions() {
            if let Some(content) = resolution.working_content() {
                guard.check(path, &content)?;
                writes.push((path, content));
            }
        }
        guard.verify()?;

        for (path, content) in writes {
            self.workspace().write_file(path, &content)?;
            self.index_mut().stage(path, content, current);
        }

        for (path, resolution) in plan.resolutions() {
            if *resolution == Resolution::Remove {
                if let Some(prior_content) = current.get(path) {
                    self.index_mut().stage_removal(path, prior_content.clone());
                }
                self.workspace().remove_file(path)?;
            }
        }

        Ok(())
    }
}
