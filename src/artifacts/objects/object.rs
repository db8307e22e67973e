use crate::artifacts::objects::object_id::ObjectId;
use anyhow::{Context, Result};
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Read, Write};

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// SHA-1 over an ordered sequence of byte strings.
pub fn digest<I, P>(parts: I) -> ObjectId
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    let mut hasher = Sha1::new();
    for part in parts {
        hasher.update(part.as_ref());
    }

    ObjectId::from_digest(hasher.finalize().as_slice())
}

/// Write a big-endian u32 length followed by the payload.
pub fn write_sized(writer: &mut impl Write, payload: &[u8]) -> Result<()> {
    let length = u32::try_from(payload.len()).context("payload too large to frame")?;
    writer.write_u32::<NetworkEndian>(length)?;
    writer.write_all(payload)?;

    Ok(())
}

/// Inverse of [`write_sized`].
pub fn read_sized(reader: &mut impl Read) -> Result<Vec<u8>> {
    let length = reader
        .read_u32::<NetworkEndian>()
        .context("unexpected end of data while reading length")?;
    let mut payload = Vec::new();
    reader
        .take(u64::from(length))
        .read_to_end(&mut payload)
        .context("failed to read payload")?;
    if payload.len() != length as usize {
        anyhow::bail!(
            "unexpected end of data while reading payload: expected {length} bytes, got {}",
            payload.len()
        );
    }

    Ok(payload)
}

pub fn read_sized_string(reader: &mut impl Read) -> Result<String> {
    String::from_utf8(read_sized(reader)?).context("payload is not valid UTF-8")
}
