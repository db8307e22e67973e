use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::errors::TwigError;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".twig", ".", ".."];

/// Plain files of the working directory, addressed by repository-relative
/// paths.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All plain files below the root, metadata directory excluded, sorted.
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = WalkDir::new(&self.path)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !Self::is_ignored(entry.path()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    /// Turn a user operand into a path relative to the root, dropping `.`
    /// components and the root prefix of absolute paths.
    ///
    /// Operands that climb with `..` or point outside the root name no file
    /// of the repository.
    pub fn relative_path(&self, operand: &str) -> anyhow::Result<PathBuf> {
        let path = Path::new(operand);
        let path = match path.strip_prefix(self.path.as_ref()) {
            Ok(relative) => relative,
            Err(_) if path.has_root() => return Err(TwigError::FileNotFound.into()),
            Err(_) => path,
        };

        if path
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            return Err(TwigError::FileNotFound.into());
        }

        Ok(path
            .components()
            .filter(|component| matches!(component, Component::Normal(_)))
            .collect())
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }

    pub fn exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Unable to read file {}", full_path.display()))?;

        Ok(Bytes::from(content))
    }

    /// Read a file if it exists as a plain file.
    pub fn try_read_file(&self, file_path: &Path) -> anyhow::Result<Option<Bytes>> {
        if self.exists(file_path) {
            self.read_file(file_path).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }

        std::fs::write(&full_path, content)
            .with_context(|| format!("Unable to write file {}", full_path.display()))
    }

    /// Delete a file and any directories it leaves empty.
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Unable to remove file {}", full_path.display()))?;
        }

        self.prune_empty_parent_dirs(&full_path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(self.path.as_ref())
            && parent.is_dir()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("Unable to remove empty directory {}", parent.display())
            })?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    // deletions first so a path freed by one file can be reused by another
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        self.apply_migration_action_set(migration, ActionType::Delete)?;
        self.apply_migration_action_set(migration, ActionType::Modify)?;
        self.apply_migration_action_set(migration, ActionType::Add)?;

        Ok(())
    }

    fn apply_migration_action_set(
        &self,
        migration: &Migration,
        action: ActionType,
    ) -> anyhow::Result<()> {
        migration
            .actions()
            .get(&action)
            .ok_or_else(|| anyhow::anyhow!("Invalid action type"))?
            .iter()
            .try_for_each(|(file_path, content)| match (&action, content) {
                (ActionType::Delete, None) => self.remove_file(file_path),
                (ActionType::Add | ActionType::Modify, Some(content)) => {
                    self.write_file(file_path, content)
                }
                _ => Err(anyhow::anyhow!("Invalid action and content combination")),
            })
    }
}
