//! Commit object model
//!
//! A repository stores exactly one kind of object: the commit. A commit is an
//! immutable snapshot holding its own metadata and the full mapping of tracked
//! paths to content bytes. Commits are content-addressed by a SHA-1 digest
//! computed over their metadata and the set of tracked file names.
//!
//! On disk every object is framed as `commit <size>\0<body>` before being
//! compressed.

pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated form shown in logs
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
