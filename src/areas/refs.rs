//! Branch and head registry
//!
//! Branches are files under `refs/heads/` holding the 40-hex id of their tip.
//! `HEAD` is always symbolic (`ref: refs/heads/<name>`) and names the current
//! branch, so the HEAD commit is by construction the tip of the current
//! branch.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use anyhow::Context;
use derive_new::new;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (`.twig`)
    path: Box<Path>,
}

impl Refs {
    /// Name of the currently selected branch.
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;
        let content = content.trim();

        let symref_match = regex::Regex::new(SYMREF_REGEX)?
            .captures(content)
            .with_context(|| format!("HEAD is not a symbolic reference: {content}"))?;

        BranchName::try_parse_ref_path(&symref_match[1])
    }

    pub fn set_current_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        tracing::debug!(branch = %name, "switching HEAD");
        self.update_ref_file(&self.head_path(), &format!("ref: {}", name.to_ref_path()))
    }

    pub fn is_current_branch(&self, name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == name)
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_file()
    }

    /// Resolve a user-supplied name to an existing branch.
    pub fn lookup_branch(&self, name: &str) -> Option<BranchName> {
        BranchName::try_parse(name.to_string())
            .ok()
            .filter(|branch| self.branch_exists(branch))
    }

    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// The commit HEAD designates: the tip of the current branch.
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let current_branch = self.current_branch()?;

        self.read_branch(&current_branch)?
            .with_context(|| format!("current branch {current_branch} has no tip"))
    }

    /// Move the current branch to `oid`.
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_branch(&self.current_branch()?, oid)
    }

    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        tracing::debug!(branch = %name, %oid, "updating branch");
        self.update_ref_file(&self.branch_path(name), oid.as_ref())
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            return Err(TwigError::BranchExists.into());
        }

        self.update_branch(name, source_oid)
    }

    /// Remove a branch pointer; commits stay in the store.
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        if self.is_current_branch(name)? {
            return Err(TwigError::CannotRemoveCurrentBranch.into());
        }

        let oid = self
            .read_branch(name)?
            .ok_or(TwigError::BranchNotFound)?;

        let branch_path = self.branch_path(name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::debug!(branch = %name, %oid, "deleted branch");

        Ok(oid)
    }

    /// All branches, sorted by name.
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                BranchName::try_parse(relative_path.to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        std::fs::write(path, raw_ref)
            .with_context(|| format!("failed to write ref file at {:?}", path))
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, name: &BranchName) -> Box<Path> {
        self.heads_path().join(name.to_path()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
