//! Split point search for merges
//!
//! The split point of the current tip C and the given tip G is the commit
//! reachable from both that sits closest to C, counting edges along any mix of
//! first and second parents.
//!
//! ## Algorithm
//!
//! 1. Walk every ancestor of G (G included) and mark it `VISITED_FROM_GIVEN`.
//! 2. Walk breadth-first from C, enqueueing the first parent before the second
//!    parent. The first dequeued commit that also carries the mark from phase
//!    one is the split point.
//!
//! The breadth-first order means "closest" is a shortest path, ties going to
//! the commit reached through earlier first parents. In criss-cross histories
//! this may pick a different ancestor than a best-common-ancestor search would.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let cache = CommitCache::new();
//! let finder = SplitPointFinder::new(|oid| cache.get_or_load_slim_commit(database, oid));
//!
//! let split = finder.find_split_point(&current_tip, &given_tip)?;
//! ```

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, VecDeque};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_GIVEN = 0b01;
        const VISITED_FROM_CURRENT = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_GIVEN.bits() | Self::VISITED_FROM_CURRENT.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_GIVEN) {
            flags.push("GIVEN");
        }
        if self.contains(VisitState::VISITED_FROM_CURRENT) {
            flags.push("CURRENT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Finds the split point of two commits.
///
/// The loader is called for every commit the search touches. It must fail for
/// unknown ids rather than invent an empty history.
#[derive(Debug, Clone)]
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Returns `None` when the histories share no commit at all.
    pub fn find_split_point(
        &self,
        current: &ObjectId,
        given: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut states = HashMap::<ObjectId, VisitState>::new();
        self.mark_ancestors_of_given(given, &mut states)?;

        let mut queue = VecDeque::from([current.clone()]);
        *states.entry(current.clone()).or_insert(VisitState::NONE) |=
            VisitState::VISITED_FROM_CURRENT;

        while let Some(commit_id) = queue.pop_front() {
            let state = states
                .get(&commit_id)
                .copied()
                .unwrap_or(VisitState::NONE);
            tracing::trace!(commit = %commit_id.to_short_oid(), ?state, "visiting");

            if state.contains(VisitState::VISITED_FROM_BOTH) {
                tracing::debug!(
                    %current,
                    %given,
                    split = %commit_id,
                    visited = states.len(),
                    "found split point"
                );
                return Ok(Some(commit_id));
            }

            let commit = (self.commit_loader)(&commit_id)?;
            for parent in commit.parents {
                let parent_state = states.entry(parent.clone()).or_insert(VisitState::NONE);
                if !parent_state.contains(VisitState::VISITED_FROM_CURRENT) {
                    *parent_state |= VisitState::VISITED_FROM_CURRENT;
                    queue.push_back(parent);
                }
            }
        }

        tracing::debug!(%current, %given, visited = states.len(), "no split point");
        Ok(None)
    }

    fn mark_ancestors_of_given(
        &self,
        given: &ObjectId,
        states: &mut HashMap<ObjectId, VisitState>,
    ) -> anyhow::Result<()> {
        let mut pending = vec![given.clone()];

        while let Some(commit_id) = pending.pop() {
            let state = states.entry(commit_id.clone()).or_insert(VisitState::NONE);
            if state.contains(VisitState::VISITED_FROM_GIVEN) {
                continue;
            }
            *state |= VisitState::VISITED_FROM_GIVEN;

            let commit = (self.commit_loader)(&commit_id)?;
            pending.extend(commit.parents);
        }

        Ok(())
    }
}
