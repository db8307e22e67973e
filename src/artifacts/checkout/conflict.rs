use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::TrackedFiles;
use crate::errors::TwigError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Collects working files, not tracked by HEAD, that an operation would
/// overwrite with different content.
#[derive(Debug)]
pub struct UntrackedGuard<'w> {
    workspace: &'w Workspace,
    head: &'w TrackedFiles,
    in_the_way: BTreeSet<PathBuf>,
}

impl<'w> UntrackedGuard<'w> {
    pub fn new(workspace: &'w Workspace, head: &'w TrackedFiles) -> Self {
        Self {
            workspace,
            head,
            in_the_way: BTreeSet::new(),
        }
    }

    /// Note an intended write of `incoming` to `path`.
    pub fn check(&mut self, path: &Path, incoming: &[u8]) -> anyhow::Result<()> {
        if self.head.contains_key(path) {
            return Ok(());
        }

        if let Some(existing) = self.workspace.try_read_file(path)?
            && existing.as_ref() != incoming
        {
            tracing::debug!(path = %path.display(), "untracked file in the way");
            self.in_the_way.insert(path.to_path_buf());
        }

        Ok(())
    }

    pub fn in_the_way(&self) -> &BTreeSet<PathBuf> {
        &self.in_the_way
    }

    /// Fail if any checked write would clobber an untracked file.
    pub fn verify(self) -> anyhow::Result<()> {
        if self.in_the_way.is_empty() {
            Ok(())
        } else {
            Err(TwigError::UntrackedFileInTheWay(self.in_the_way.into_iter().collect()).into())
        }
    }
}
