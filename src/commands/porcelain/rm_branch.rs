use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::TwigError;

impl Repository {
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| TwigError::BranchNotFound)?;

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
