//! Working-directory migrations
//!
//! Switching branches, resetting and fast-forwarding all replace the files
//! tracked by one commit with those of another. The change is planned in full
//! and checked for untracked files in the way before the first file is
//! touched.

pub mod conflict;
pub mod migration;
