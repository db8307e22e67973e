//! User-facing operations
//!
//! - `init`: create the metadata directory and the root commit
//! - `add`, `rm`: stage files for addition or removal
//! - `commit`: record the staged state as a new commit
//! - `log`, `find`: inspect history
//! - `status`: branches, staging and working directory report
//! - `checkout`, `reset`: restore files or switch the working directory
//! - `branch`, `rm_branch`: create and delete branch pointers
//! - `merge`: three-way merge of another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod rm_branch;
pub mod status;
