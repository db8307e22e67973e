use crate::artifacts::index::CHECKSUM_SIZE;
use anyhow::anyhow;
use byteorder::{ByteOrder, NetworkEndian};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// Reader/writer that hashes everything passing through it.
#[derive(Debug)]
pub struct Checksum<F> {
    file: F,
    digest: Sha1,
}

impl<F> Checksum<F> {
    pub(crate) fn new(file: F) -> Self {
        Checksum {
            file,
            digest: Sha1::new(),
        }
    }
}

impl<F: Read> Checksum<F> {
    pub(crate) fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        // sizes may come from disk, so nothing is allocated ahead of the data
        let mut buffer = Vec::new();
        (&mut self.file)
            .take(size as u64)
            .read_to_end(&mut buffer)?;
        if buffer.len() != size {
            return Err(anyhow!("Unexpected end-of-file while reading index"));
        }

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    /// Read a big-endian u32 length, then that many bytes.
    pub(crate) fn read_sized(&mut self) -> anyhow::Result<Bytes> {
        let length = NetworkEndian::read_u32(&self.read(4)?);
        self.read(length as usize)
    }

    pub(crate) fn verify(&mut self) -> anyhow::Result<()> {
        let mut expected_checksum = [0u8; CHECKSUM_SIZE];
        self.file
            .read_exact(&mut expected_checksum)
            .map_err(|_| anyhow!("Index file is missing its checksum"))?;

        let actual_checksum = self.digest.clone().finalize();

        if expected_checksum != actual_checksum.as_slice() {
            return Err(anyhow!("Checksum does not match value stored on disk"));
        }

        Ok(())
    }
}

impl<F: Write> Checksum<F> {
    pub(crate) fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.file.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub(crate) fn write_checksum(&mut self) -> anyhow::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.file
            .write_all(checksum.as_slice())
            .map_err(|_| anyhow!("Failed to write checksum to index file"))?;

        Ok(())
    }

    pub(crate) fn flush(&mut self) -> anyhow::Result<()> {
        self.file.flush()?;
        Ok(())
    }
}
