//! Per-file reconciliation
//!
//! Each path named by the current or given commit is classified once by where
//! it is present (split point S, current tip C, given tip G) and how the
//! contents compare, then mapped to a single [`Resolution`]:
//!
//! | present in | contents              | resolution    |
//! |------------|-----------------------|---------------|
//! | S, C, G    | C = G                 | unchanged     |
//! | S, C, G    | C = S, G differs      | take given    |
//! | S, C, G    | G = S, C differs      | keep current  |
//! | S, C, G    | all differ            | conflict      |
//! | C, G       | C = G                 | unchanged     |
//! | C, G       | differ                | conflict      |
//! | G          |                       | take given    |
//! | S, G       | G = S                 | unchanged     |
//! | S, G       | G differs             | conflict      |
//! | S, C       | C = S                 | remove        |
//! | S, C       | C differs             | conflict      |
//! | C          |                       | unchanged     |

use crate::artifacts::merge::conflict::render_conflict;
use crate::artifacts::objects::commit::TrackedFiles;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState<'a> {
    OnlyInSplit,
    OnlyInCurrent,
    OnlyInGiven {
        given: &'a Bytes,
    },
    InCurrentAndGiven {
        current: &'a Bytes,
        given: &'a Bytes,
    },
    InSplitAndCurrent {
        split: &'a Bytes,
        current: &'a Bytes,
    },
    InSplitAndGiven {
        split: &'a Bytes,
        given: &'a Bytes,
    },
    InAllThree {
        split: &'a Bytes,
        current: &'a Bytes,
        given: &'a Bytes,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Unchanged,
    KeepCurrent,
    TakeGiven(Bytes),
    Remove,
    Conflict {
        current: Option<Bytes>,
        given: Option<Bytes>,
    },
}

impl<'a> FileState<'a> {
    pub fn classify(
        split: Option<&'a Bytes>,
        current: Option<&'a Bytes>,
        given: Option<&'a Bytes>,
    ) -> Option<Self> {
        let state = match (split, current, given) {
            (None, None, None) => return None,
            (Some(_), None, None) => FileState::OnlyInSplit,
            (None, Some(_), None) => FileState::OnlyInCurrent,
            (None, None, Some(given)) => FileState::OnlyInGiven { given },
            (None, Some(current), Some(given)) => FileState::InCurrentAndGiven { current, given },
            (Some(split), Some(current), None) => FileState::InSplitAndCurrent { split, current },
            (Some(split), None, Some(given)) => FileState::InSplitAndGiven { split, given },
            (Some(split), Some(current), Some(given)) => FileState::InAllThree {
                split,
                current,
                given,
            },
        };

        Some(state)
    }

    pub fn resolve(&self) -> Resolution {
        match *self {
            FileState::OnlyInSplit | FileState::OnlyInCurrent => Resolution::Unchanged,
            FileState::OnlyInGiven { given } => Resolution::TakeGiven(given.clone()),
            FileState::InCurrentAndGiven { current, given } => {
                if current == given {
                    Resolution::Unchanged
                } else {
                    Self::conflict(Some(current), Some(given))
                }
            }
            FileState::InSplitAndCurrent { split, current } => {
                if current == split {
                    Resolution::Remove
                } else {
                    Self::conflict(Some(current), None)
                }
            }
            FileState::InSplitAndGiven { split, given } => {
                if given == split {
                    Resolution::Unchanged
                } else {
                    Self::conflict(None, Some(given))
                }
            }
            FileState::InAllThree {
                split,
                current,
                given,
            } => {
                if current == given {
                    Resolution::Unchanged
                } else if current == split {
                    Resolution::TakeGiven(given.clone())
                } else if given == split {
                    Resolution::KeepCurrent
                } else {
                    Self::conflict(Some(current), Some(given))
                }
            }
        }
    }

    fn conflict(current: Option<&Bytes>, given: Option<&Bytes>) -> Resolution {
        Resolution::Conflict {
            current: current.cloned(),
            given: given.cloned(),
        }
    }
}

impl Resolution {
    /// Content the working file must hold afterwards, when it changes.
    pub fn working_content(&self) -> Option<Bytes> {
        match self {
            Resolution::TakeGiven(given) => Some(given.clone()),
            Resolution::Conflict { current, given } => Some(render_conflict(
                current.as_deref(),
                given.as_deref(),
            )),
            Resolution::Unchanged | Resolution::KeepCurrent | Resolution::Remove => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Resolution::Conflict { .. })
    }
}

/// Resolutions for every path named by the current or given commit.
#[derive(Debug, Clone, Default)]
pub struct MergePlan {
    resolutions: BTreeMap<PathBuf, Resolution>,
}

impl MergePlan {
    pub fn build(split: &TrackedFiles, current: &TrackedFiles, given: &TrackedFiles) -> Self {
        let mut resolutions = BTreeMap::new();

        let given_paths = given.keys();
        let current_only_paths = current.keys().filter(|path| !given.contains_key(*path));

        for path in given_paths.chain(current_only_paths) {
            let state = FileState::classify(split.get(path), current.get(path), given.get(path));
            if let Some(state) = state {
                let resolution = state.resolve();
                tracing::debug!(path = %path.display(), ?state, ?resolution, "classified");
                resolutions.insert(path.clone(), resolution);
            }
        }

        MergePlan { resolutions }
    }

    pub fn resolutions(&self) -> impl Iterator<Item = (&PathBuf, &Resolution)> {
        self.resolutions.iter()
    }

    pub fn get(&self, path: &std::path::Path) -> Option<&Resolution> {
        self.resolutions.get(path)
    }

    pub fn has_conflicts(&self) -> bool {
        self.resolutions.values().any(Resolution::is_conflict)
    }
}
