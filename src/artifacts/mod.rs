//! Data structures and algorithms
//!
//! - `branch`: branch-name validation
//! - `checkout`: working-directory migrations and the untracked-file guard
//! - `core`: shared utilities (pager wrapper)
//! - `index`: staging file codec
//! - `log`: first-parent history walk
//! - `merge`: split point search and per-file reconciliation
//! - `objects`: commit object model
//! - `status`: status report

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
