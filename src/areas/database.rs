use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// One directory per leading hex character of an object id.
pub const SHARDS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

/// Append-only store of compressed commit objects.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn create_shards(&self) -> anyhow::Result<()> {
        for shard in SHARDS {
            let shard_path = self.path.join(shard.to_string());
            std::fs::create_dir_all(&shard_path).with_context(|| {
                format!("Unable to create object shard {}", shard_path.display())
            })?;
        }

        Ok(())
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        self.read_object(object_path)
    }

    /// Persist a commit unless an object with the same id is already stored.
    pub fn store(&self, commit: &Commit) -> anyhow::Result<()> {
        let object_path = self.path.join(commit.oid().to_path());

        if object_path.exists() {
            tracing::debug!(oid = %commit.oid(), "object already stored");
            return Ok(());
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        let object_content = commit.serialize()?;
        tracing::debug!(oid = %commit.oid(), size = object_content.len(), "storing commit");

        self.write_object(object_path, object_content)
    }

    pub fn parse_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        if !self.contains(object_id) {
            return Err(TwigError::CommitNotFound.into());
        }

        let object_content = self.load(object_id)?;
        let commit = Commit::deserialize(Cursor::new(object_content))
            .with_context(|| format!("Corrupt commit object {object_id}"))?;

        if commit.oid() != object_id {
            anyhow::bail!(
                "Commit object {object_id} hashes to {}, the store is corrupt",
                commit.oid()
            );
        }

        Ok(commit)
    }

    pub fn load_slim_commit(&self, object_id: &ObjectId) -> anyhow::Result<SlimCommit> {
        Ok(SlimCommit::from(&self.parse_commit(object_id)?))
    }

    /// Every stored object id, shard by shard, sorted within a shard.
    pub fn list_commits(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut object_ids = Vec::new();

        for shard in SHARDS {
            object_ids.extend(self.list_shard(&shard.to_string(), "")?);
        }

        Ok(object_ids)
    }

    /// Find all objects whose id starts with the given prefix.
    ///
    /// Only the shard named by the first character is scanned. An empty or
    /// non-hex prefix matches nothing.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Vec::new());
        }

        let prefix = prefix.to_ascii_lowercase();
        self.list_shard(&prefix[..1], &prefix)
    }

    fn list_shard(&self, shard: &str, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let shard_path = self.path.join(shard);
        if !shard_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = std::fs::read_dir(&shard_path)
            .with_context(|| format!("Unable to list object shard {}", shard_path.display()))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let file_name = entry.file_name().to_string_lossy().to_string();
                if file_name.starts_with(prefix) {
                    ObjectId::try_parse(file_name).ok()
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        matches.sort();

        Ok(matches)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename so readers never observe a partially written object
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

/// Memoizes parent lists while walking the commit graph.
#[derive(Debug, Default)]
pub struct CommitCache {
    slim_commits: RefCell<HashMap<ObjectId, SlimCommit>>,
}

impl CommitCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load_slim_commit(
        &self,
        database: &Database,
        object_id: &ObjectId,
    ) -> anyhow::Result<SlimCommit> {
        if let Some(slim_commit) = self.slim_commits.borrow().get(object_id) {
            return Ok(slim_commit.clone());
        }

        let slim_commit = database.load_slim_commit(object_id)?;
        self.slim_commits
            .borrow_mut()
            .insert(object_id.clone(), slim_commit.clone());

        Ok(slim_commit)
    }
}
