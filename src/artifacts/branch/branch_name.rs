use crate::artifacts::branch::{DEFAULT_BRANCH, INVALID_BRANCH_NAME_REGEX};
use crate::errors::TwigError;
use anyhow::Context;
use std::path::PathBuf;

const REF_PREFIX: &str = "refs/heads/";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            return Err(TwigError::InvalidBranchName(name).into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(TwigError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    /// Strip the `refs/heads/` prefix of a symbolic reference target.
    pub fn try_parse_ref_path(ref_path: &str) -> anyhow::Result<Self> {
        let name = ref_path.strip_prefix(REF_PREFIX).with_context(|| {
            format!("symbolic ref must start with '{REF_PREFIX}', got '{ref_path}'")
        })?;

        Self::try_parse(name.to_string())
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    pub fn to_ref_path(&self) -> String {
        format!("{REF_PREFIX}{}", self.0)
    }

    /// Location of the branch file relative to `refs/heads`.
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
