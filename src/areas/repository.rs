use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::TwigError;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the metadata directory at the root of the working directory.
pub const METADATA_DIR: &str = ".twig";

/// Everything an operation needs: the persisted areas of one repository and
/// the sink for user-facing output.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Index,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Bind to `path` without requiring a repository to exist there.
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;
        let metadata_path = path.join(METADATA_DIR);

        let index = Index::new(metadata_path.join("index").into_boxed_path());
        let database = Database::new(metadata_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(metadata_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index,
            database,
            workspace,
            refs,
        })
    }

    /// Bind to an initialized repository and load its staging area.
    pub fn open(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let mut repository = Self::new(path, writer)?;
        if !repository.is_initialized() {
            return Err(TwigError::NotInitialized.into());
        }

        repository.index.rehydrate()?;

        Ok(repository)
    }

    pub fn is_initialized(&self) -> bool {
        self.metadata_path().is_dir()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> Box<Path> {
        self.path.join(METADATA_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.database.parse_commit(&self.refs.read_head()?)
    }

    /// Resolve a full id or an abbreviated prefix to a stored commit.
    ///
    /// When several commits share the prefix the first in id order wins.
    pub fn resolve_commit(&self, revision: &str) -> anyhow::Result<ObjectId> {
        if revision.len() == OBJECT_ID_LENGTH
            && let Ok(oid) = ObjectId::try_parse(revision.to_string())
            && self.database.contains(&oid)
        {
            return Ok(oid);
        }

        let matches = self.database.find_objects_by_prefix(revision)?;
        if matches.len() > 1 {
            tracing::warn!(
                prefix = revision,
                candidates = matches.len(),
                "ambiguous commit prefix"
            );
        }

        matches
            .into_iter()
            .next()
            .ok_or_else(|| TwigError::CommitNotFound.into())
    }
}
