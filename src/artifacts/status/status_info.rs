use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;
pub type FileSet = BTreeSet<PathBuf>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) branches: Vec<BranchName>,
    pub(crate) current_branch: BranchName,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

impl StatusInfo {
    pub fn branches(&self) -> &[BranchName] {
        &self.branches
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.current_branch
    }

    pub fn staged_files(&self) -> &FileSet {
        &self.staged_files
    }

    pub fn removed_files(&self) -> &FileSet {
        &self.removed_files
    }

    pub fn workspace_changeset(&self) -> &ChangeSet {
        &self.workspace_changeset
    }

    pub fn untracked_files(&self) -> &FileSet {
        &self.untracked_files
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl Status<'_> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let head = self.repository.head_commit()?;
        let index = self.repository.index();

        let staged_files = index.additions().keys().cloned().collect::<FileSet>();
        let removed_files = index.removals().keys().cloned().collect::<FileSet>();
        let workspace_changeset = self.detect_workspace_changes(head.tracked())?;
        let untracked_files = self.collect_untracked_files(head.tracked())?;

        Ok(StatusInfo {
            branches: self.repository.refs().list_branches()?,
            current_branch: self.repository.refs().current_branch()?,
            staged_files,
            removed_files,
            workspace_changeset,
            untracked_files,
        })
    }

    // A file is reported when the working copy differs from what the next
    // commit would record for it: the staged content if staged, else HEAD's.
    fn detect_workspace_changes(&self, head: &TrackedFiles) -> anyhow::Result<ChangeSet> {
        let index = self.repository.index();
        let workspace = self.repository.workspace();

        let expected = index
            .additions()
            .iter()
            .chain(
                head.iter()
                    .filter(|(path, _)| !index.is_staged_for_addition(path))
                    .filter(|(path, _)| !index.is_staged_for_removal(path)),
            )
            .collect::<BTreeMap<_, _>>();

        let mut changes = ChangeSet::new();
        for (path, content) in expected {
            match workspace.try_read_file(path)? {
                None => {
                    changes.insert(path.clone(), WorkspaceChangeType::Deleted);
                }
                Some(current) if &current != content => {
                    changes.insert(path.clone(), WorkspaceChangeType::Modified);
                }
                Some(_) => {}
            }
        }

        Ok(changes)
    }

    fn collect_untracked_files(&self, head: &TrackedFiles) -> anyhow::Result<FileSet> {
        let index = self.repository.index();

        Ok(self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|path| !index.is_staged_for_addition(path))
            .filter(|path| !head.contains_key(path) || index.is_staged_for_removal(path))
            .collect())
    }
}
