//! Command implementations
//!
//! Each user-level operation is an `impl Repository` block in its own module
//! under `porcelain`, taking already-parsed operands and writing its report
//! through the repository writer.

pub mod porcelain;
