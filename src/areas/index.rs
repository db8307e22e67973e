//! Staging area
//!
//! Holds the changes queued for the next commit: files staged for addition
//! (path to new content) and files staged for removal (path to the content
//! they had in HEAD, kept so a branch switch can restore them). A path is
//! never staged both ways at once.
//!
//! The staging area is persisted to `.twig/index` with a trailing SHA-1
//! checksum that is verified on every load.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::stage_entry::StageEntry;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::TwigError;
use anyhow::{Context, anyhow};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What [`Index::stage`] did with a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// The content was recorded for addition.
    Staged,
    /// A pending removal was cancelled instead.
    RemovalCancelled,
    /// The content matches HEAD, so nothing is pending for the path.
    MatchesHead,
}

/// What [`Index::unstage`] did with a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnstageOutcome {
    /// A pending addition was dropped; the file is not tracked by HEAD.
    AdditionDropped,
    /// The file is tracked by HEAD and is now staged for removal.
    RemovalStaged,
}

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the staging file (`.twig/index`)
    path: Box<Path>,
    additions: BTreeMap<PathBuf, Bytes>,
    removals: BTreeMap<PathBuf, Bytes>,
    /// Set whenever the in-memory state diverges from disk
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn additions(&self) -> &BTreeMap<PathBuf, Bytes> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeMap<PathBuf, Bytes> {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn is_staged_for_addition(&self, path: &Path) -> bool {
        self.additions.contains_key(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removals.contains_key(path)
    }

    /// Queue `content` for `path` relative to the files tracked by HEAD.
    ///
    /// A pending removal of the path is cancelled without recording content.
    /// Content equal to HEAD's leaves nothing pending for the path.
    pub fn stage(&mut self, path: &Path, content: Bytes, head: &TrackedFiles) -> StageOutcome {
        if self.removals.remove(path).is_some() {
            tracing::debug!(path = %path.display(), "cancelled staged removal");
            self.changed = true;
            return StageOutcome::RemovalCancelled;
        }

        if head.get(path) == Some(&content) {
            if self.additions.remove(path).is_some() {
                self.changed = true;
            }
            return StageOutcome::MatchesHead;
        }

        if self.additions.get(path) != Some(&content) {
            tracing::debug!(path = %path.display(), size = content.len(), "staged for addition");
            self.additions.insert(path.to_path_buf(), content);
            self.changed = true;
        }

        StageOutcome::Staged
    }

    /// Record that `path` should leave the next commit, remembering its
    /// HEAD content.
    pub fn stage_removal(&mut self, path: &Path, prior_content: Bytes) {
        self.additions.remove(path);
        self.removals.insert(path.to_path_buf(), prior_content);
        self.changed = true;
        tracing::debug!(path = %path.display(), "staged for removal");
    }

    /// Forget a pending addition and, if HEAD tracks the path, stage its
    /// removal. The caller deletes the working file in the latter case.
    pub fn unstage(&mut self, path: &Path, head: &TrackedFiles) -> anyhow::Result<UnstageOutcome> {
        let was_staged = self.additions.remove(path).is_some();
        if was_staged {
            self.changed = true;
        }

        match head.get(path) {
            Some(prior_content) => {
                self.stage_removal(path, prior_content.clone());
                Ok(UnstageOutcome::RemovalStaged)
            }
            None if was_staged => Ok(UnstageOutcome::AdditionDropped),
            None => Err(TwigError::NoReasonToRemove.into()),
        }
    }

    pub fn drop_addition(&mut self, path: &Path) {
        if self.additions.remove(path).is_some() {
            self.changed = true;
        }
    }

    /// Start from the files tracked by HEAD, drop removals, apply additions.
    pub fn apply_to(&self, head: &TrackedFiles) -> TrackedFiles {
        let mut tracked = head.clone();
        for path in self.removals.keys() {
            tracked.remove(path);
        }
        for (path, content) in &self.additions {
            tracked.insert(path.clone(), content.clone());
        }

        tracked
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.changed = true;
        }
        self.additions.clear();
        self.removals.clear();
    }

    /// Load the staging area from disk. A missing or empty file means
    /// nothing is staged.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let index_file = std::fs::File::open(&self.path)
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        if index_file.metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(std::io::BufReader::new(index_file));
        let header = Self::parse_header(&mut reader)?;

        for _ in 0..header.additions_count {
            let entry = StageEntry::read_from(&mut reader)?;
            self.additions.insert(entry.path, entry.content);
        }
        for _ in 0..header.removals_count {
            let entry = StageEntry::read_from(&mut reader)?;
            self.removals.insert(entry.path, entry.content);
        }

        reader
            .verify()
            .with_context(|| format!("Corrupt index file {}", self.path.display()))
    }

    fn parse_header<F: std::io::Read>(reader: &mut Checksum<F>) -> anyhow::Result<IndexHeader> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header)
    }

    /// Persist the staging area if it changed since it was loaded.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        let mut writer = Checksum::new(std::io::BufWriter::new(index_file));

        let header = IndexHeader {
            additions_count: u32::try_from(self.additions.len())?,
            removals_count: u32::try_from(self.removals.len())?,
            ..IndexHeader::empty()
        };
        writer.write(&header.serialize()?)?;

        for (path, content) in self.additions.iter().chain(self.removals.iter()) {
            let entry = StageEntry::new(path.clone(), content.clone());
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        writer.flush()?;
        self.changed = false;

        tracing::debug!(
            additions = self.additions.len(),
            removals = self.removals.len(),
            "index written"
        );

        Ok(())
    }
}
