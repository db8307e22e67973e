//! Commit history for `log` and `global-log`
//!
//! - `ancestors`: first-parent walk from a tip down to the root commit
//! - `log_entry`: the per-commit report block

pub mod ancestors;
pub mod log_entry;
