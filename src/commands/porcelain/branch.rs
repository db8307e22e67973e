use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let source_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &source_oid)?;

        Ok(())
    }
}
