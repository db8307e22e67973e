use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::TwigError;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(TwigError::AlreadyInitialized.into());
        }

        self.database()
            .create_shards()
            .context("Failed to create .twig/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .twig/refs/heads directory")?;

        let default_branch = BranchName::default_branch();
        self.refs()
            .set_current_branch(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        let root = Commit::root();
        self.database().store(&root)?;
        self.refs().update_branch(&default_branch, root.oid())?;
        tracing::info!(root = %root.oid(), "initialized repository");

        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
