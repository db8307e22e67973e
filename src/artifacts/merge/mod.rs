//! Three-way merge of two branch tips
//!
//! - `split_point`: nearest common ancestor of the current and given tips
//! - `resolution`: per-file classification against split, current and given
//! - `conflict`: textual rendering of a conflicted file

pub mod conflict;
pub mod resolution;
pub mod split_point;

use crate::artifacts::objects::object_id::ObjectId;

/// How a merge ended, for callers that need more than the printed notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The current branch was behind and now points at the given tip.
    FastForward(ObjectId),
    /// A merge commit was created; `conflicted` is set when at least one
    /// file carries conflict markers.
    Merged { oid: ObjectId, conflicted: bool },
}
