//! Persisted repository areas
//!
//! - `database`: append-only store of compressed commit objects
//! - `index`: staging area for the next commit
//! - `refs`: branch pointers and the current-branch selector
//! - `repository`: owns the areas and the output writer
//! - `workspace`: plain files of the working directory

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
