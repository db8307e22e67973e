//! User-facing failures
//!
//! Every condition a user can trigger through the command line maps to one
//! variant below. The `Display` text is printed verbatim before exiting with
//! a failure status. Anything else (I/O, corrupt metadata) travels as a plain
//! `anyhow::Error` with context attached.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TwigError {
    // usage
    #[error("Incorrect operands.")]
    IncorrectOperands,
    #[error("Not in an initialized twig directory.")]
    NotInitialized,
    #[error("A twig version-control system already exists in the current directory.")]
    AlreadyInitialized,

    // commits
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No changes added to the commit.")]
    NoChanges,
    #[error("No commit with that id exists.")]
    CommitNotFound,
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    // files
    #[error("File does not exist.")]
    FileNotFound,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("No reason to remove the file.")]
    NoReasonToRemove,

    // branches
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("A branch with that name does not exist.")]
    BranchNotFound,
    #[error("No such branch exists.")]
    NoSuchBranch,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,
    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    // merge
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,
    #[error("Given branch is an ancestor of the current branch.")]
    GivenIsAncestor,
    #[error("No split point between the current and given branch.")]
    NoSplitPoint,

    // working directory
    #[error("There is an untracked file in the way; delete it or add it first.")]
    UntrackedFileInTheWay(Vec<PathBuf>),
}

/// Coarse grouping of [`TwigError`] variants, attached to the log record
/// emitted when a command aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    NotInitialized,
    AlreadyInitialized,
    NotFound,
    AmbiguousOrInvalidId,
    NothingToDo,
    WorkingDirectoryConflict,
}

impl TwigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TwigError::IncorrectOperands
            | TwigError::EmptyMessage
            | TwigError::InvalidBranchName(_) => ErrorKind::Usage,
            TwigError::NotInitialized => ErrorKind::NotInitialized,
            TwigError::AlreadyInitialized => ErrorKind::AlreadyInitialized,
            TwigError::FileNotFound
            | TwigError::FileNotInCommit
            | TwigError::BranchNotFound
            | TwigError::NoSuchBranch
            | TwigError::NoCommitWithMessage
            | TwigError::NoSplitPoint => ErrorKind::NotFound,
            TwigError::CommitNotFound => ErrorKind::AmbiguousOrInvalidId,
            TwigError::NoChanges
            | TwigError::NoReasonToRemove
            | TwigError::BranchExists
            | TwigError::AlreadyOnBranch
            | TwigError::CannotRemoveCurrentBranch
            | TwigError::UncommittedChanges
            | TwigError::MergeWithSelf
            | TwigError::GivenIsAncestor => ErrorKind::NothingToDo,
            TwigError::UntrackedFileInTheWay(_) => ErrorKind::WorkingDirectoryConflict,
        }
    }
}

/// Extract the user-facing failure carried by an error chain, if any.
pub fn as_twig_error(error: &anyhow::Error) -> Option<&TwigError> {
    error.chain().find_map(|cause| cause.downcast_ref::<TwigError>())
}
