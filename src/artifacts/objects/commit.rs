//! Commit object
//!
//! A commit captures a full snapshot: every tracked path mapped to its content
//! bytes, plus a timestamp, a message and up to two parents. The root commit
//! of every repository is identical (message `initial commit`, epoch
//! timestamp, no parent, no files), so its id is the same everywhere.
//!
//! ## Identity
//!
//! The id is the SHA-1 of, in order: the timestamp (RFC 3339 with nanosecond
//! precision), the parent id when present, the message, and the
//! newline-joined sorted tracked file names. File contents and the second
//! parent do not take part in the digest.
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! <sized timestamp>
//! <u8 has-parent> [<sized parent id>]
//! <u8 has-second-parent> [<sized second parent id>]
//! <sized message>
//! <u32 file count> (<sized path> <sized content>)*
//! ```
//!
//! Sized fields are a big-endian u32 length followed by the raw bytes.

use crate::artifacts::objects::object::{
    Packable, Unpackable, digest, read_sized, read_sized_string, write_sized,
};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use anyhow::Context;
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};

/// Path to content mapping captured by a commit.
pub type TrackedFiles = BTreeMap<PathBuf, Bytes>;

pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

const OBJECT_TYPE: &str = "commit";
const READABLE_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    oid: ObjectId,
    timestamp: DateTime<FixedOffset>,
    parent: Option<ObjectId>,
    second_parent: Option<ObjectId>,
    message: String,
    tracked: TrackedFiles,
}

impl Commit {
    /// The commit every repository starts from.
    pub fn root() -> Self {
        Self::assemble(
            ROOT_COMMIT_MESSAGE.to_string(),
            DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            None,
            None,
            TrackedFiles::new(),
        )
    }

    /// Create a commit stamped with the current local time.
    pub fn create(
        message: String,
        parent: Option<ObjectId>,
        tracked: TrackedFiles,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<Self> {
        Self::create_at(
            message,
            parent,
            tracked,
            second_parent,
            chrono::Local::now().fixed_offset(),
        )
    }

    pub fn create_at(
        message: String,
        parent: Option<ObjectId>,
        tracked: TrackedFiles,
        second_parent: Option<ObjectId>,
        timestamp: DateTime<FixedOffset>,
    ) -> anyhow::Result<Self> {
        if message.is_empty() {
            return Err(TwigError::EmptyMessage.into());
        }

        Ok(Self::assemble(
            message,
            timestamp,
            parent,
            second_parent,
            tracked,
        ))
    }

    fn assemble(
        message: String,
        timestamp: DateTime<FixedOffset>,
        parent: Option<ObjectId>,
        second_parent: Option<ObjectId>,
        tracked: TrackedFiles,
    ) -> Self {
        let oid = Self::compute_oid(&timestamp, parent.as_ref(), &message, &tracked);

        Commit {
            oid,
            timestamp,
            parent,
            second_parent,
            message,
            tracked,
        }
    }

    fn compute_oid(
        timestamp: &DateTime<FixedOffset>,
        parent: Option<&ObjectId>,
        message: &str,
        tracked: &TrackedFiles,
    ) -> ObjectId {
        let names = tracked
            .keys()
            .map(|path| path.to_string_lossy())
            .collect::<Vec<_>>()
            .join("\n");

        let timestamp = Self::timestamp_key(timestamp);
        let mut parts: Vec<&[u8]> = vec![timestamp.as_bytes()];
        if let Some(parent) = parent {
            parts.push(parent.as_ref().as_bytes());
        }
        parts.push(message.as_bytes());
        parts.push(names.as_bytes());

        digest(parts)
    }

    fn timestamp_key(timestamp: &DateTime<FixedOffset>) -> String {
        timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format(READABLE_TIMESTAMP_FORMAT)
            .to_string()
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    /// First parent, then second parent.
    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.parent.iter().chain(self.second_parent.iter())
    }

    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }

    pub fn tracked(&self) -> &TrackedFiles {
        &self.tracked
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.tracked.contains_key(path)
    }

    pub fn content(&self, path: &Path) -> Option<&Bytes> {
        self.tracked.get(path)
    }

    fn write_optional_oid(body: &mut Vec<u8>, oid: Option<&ObjectId>) -> anyhow::Result<()> {
        match oid {
            Some(oid) => {
                body.write_u8(1)?;
                write_sized(body, oid.as_ref().as_bytes())
            }
            None => Ok(body.write_u8(0)?),
        }
    }

    fn read_optional_oid(reader: &mut impl Read) -> anyhow::Result<Option<ObjectId>> {
        match reader.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(ObjectId::try_parse(read_sized_string(reader)?)?)),
            flag => anyhow::bail!("Invalid parent flag in commit: {flag}"),
        }
    }

    fn parse_header(reader: &mut impl BufRead) -> anyhow::Result<usize> {
        let mut header = Vec::new();
        reader
            .read_until(b'\0', &mut header)
            .context("Unable to read object header")?;

        let header = std::str::from_utf8(&header)
            .context("Object header is not valid UTF-8")?
            .trim_end_matches('\0');
        let (object_type, size) = header
            .split_once(' ')
            .ok_or_else(|| anyhow::anyhow!("Malformed object header: {header}"))?;

        if object_type != OBJECT_TYPE {
            anyhow::bail!("Unexpected object type: {object_type}");
        }

        size.parse::<usize>()
            .with_context(|| format!("Invalid object size: {size}"))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut body = Vec::new();

        write_sized(&mut body, Self::timestamp_key(&self.timestamp).as_bytes())?;
        Self::write_optional_oid(&mut body, self.parent.as_ref())?;
        Self::write_optional_oid(&mut body, self.second_parent.as_ref())?;
        write_sized(&mut body, self.message.as_bytes())?;

        let count = u32::try_from(self.tracked.len()).context("too many tracked files")?;
        body.write_u32::<NetworkEndian>(count)?;
        for (path, content) in &self.tracked {
            write_sized(&mut body, path.to_string_lossy().as_bytes())?;
            write_sized(&mut body, content)?;
        }

        let mut object = Vec::with_capacity(body.len() + 16);
        write!(object, "{} {}\0", OBJECT_TYPE, body.len())?;
        object.extend_from_slice(&body);

        Ok(Bytes::from(object))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let size = Self::parse_header(&mut reader)?;

        let mut body = Vec::with_capacity(size);
        reader.read_to_end(&mut body)?;
        if body.len() != size {
            anyhow::bail!(
                "Commit body size mismatch: header says {size}, found {}",
                body.len()
            );
        }
        let mut body = body.as_slice();

        let timestamp = read_sized_string(&mut body)?;
        let timestamp = DateTime::parse_from_rfc3339(&timestamp)
            .with_context(|| format!("Invalid commit timestamp: {timestamp}"))?;
        let parent = Self::read_optional_oid(&mut body)?;
        let second_parent = Self::read_optional_oid(&mut body)?;
        let message = read_sized_string(&mut body)?;

        let count = body.read_u32::<NetworkEndian>()?;
        let mut tracked = TrackedFiles::new();
        for _ in 0..count {
            let path = PathBuf::from(read_sized_string(&mut body)?);
            let content = Bytes::from(read_sized(&mut body)?);
            tracked.insert(path, content);
        }

        Ok(Self::assemble(
            message,
            timestamp,
            parent,
            second_parent,
            tracked,
        ))
    }
}

/// Parents-only view of a commit used by graph walks.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
}

impl From<&Commit> for SlimCommit {
    fn from(commit: &Commit) -> Self {
        SlimCommit {
            oid: commit.oid().clone(),
            parents: commit.parents().cloned().collect(),
        }
    }
}
