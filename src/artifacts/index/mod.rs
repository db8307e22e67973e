//! Staging file format
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "TIDX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Staged-for-addition count (4 bytes)
//!   - Staged-for-removal count (4 bytes)
//!
//! Entries (variable length), additions first, then removals:
//!   - Sized path
//!   - Sized content
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_header;
pub mod stage_entry;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the staging file header in bytes
pub const HEADER_SIZE: usize = 16;

pub const SIGNATURE: &str = "TIDX";

pub const VERSION: u32 = 1;
