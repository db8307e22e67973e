//! Working directory status
//!
//! - `file_change`: kinds of unstaged modification
//! - `status_info`: the report model, collected from HEAD, staging and the
//!   working directory

pub mod file_change;
pub mod status_info;
