use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::objects::object::{Packable, write_sized};
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::Read;
use std::path::PathBuf;

/// A path and the content recorded for it in the staging area.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StageEntry {
    pub path: PathBuf,
    pub content: Bytes,
}

impl StageEntry {
    pub(crate) fn read_from<F: Read>(reader: &mut Checksum<F>) -> anyhow::Result<Self> {
        let path = String::from_utf8(reader.read_sized()?.to_vec())
            .context("Staged path is not valid UTF-8")?;
        let content = reader.read_sized()?;

        Ok(StageEntry::new(PathBuf::from(path), content))
    }
}

impl Packable for StageEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::new();
        write_sized(&mut bytes, self.path.to_string_lossy().as_bytes())?;
        write_sized(&mut bytes, &self.content)?;

        Ok(Bytes::from(bytes))
    }
}
