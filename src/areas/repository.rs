use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::ignore::IgnorePredicate;
use crate::config::Config;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::cell::{Ref, RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the directory holding all repository state
pub const REPOSITORY_DIR: &str = ".trove";

/// Ignore file inside the repository directory
pub const IGNORE_FILE: &str = "ignore";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    config: Config,
    ignore: Option<Box<dyn IgnorePredicate>>,
    current_branch: RefCell<BranchName>,
}

impl Repository {
    /// Set up the repository areas rooted at `path`, creating the directory if
    /// needed. Nothing inside `.trove` is read or written until a command runs.
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory {:?}", path))?;
        }
        let path = path.canonicalize()?;
        let repository_path = path.join(REPOSITORY_DIR);

        let index = Index::new(repository_path.join("index").into_boxed_path());
        let database = Database::new(repository_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(repository_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
            config: Config::default(),
            ignore: None,
            current_branch: RefCell::new(BranchName::default_branch()),
        })
    }

    /// Open an initialized repository
    ///
    /// Fails with `NotARepository` when `path` has no `.trove/HEAD`.
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.join(REPOSITORY_DIR).join("HEAD").is_file() {
            return Err(RepositoryError::NotARepository(path.to_path_buf()).into());
        }

        let repository = Self::new(path, writer)?;
        repository.refresh_current_branch()?;

        Ok(repository)
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replace the ignore rules read from `.trove/ignore`
    pub fn with_ignore(mut self, ignore: impl IgnorePredicate + 'static) -> Self {
        self.ignore = Some(Box::new(ignore));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository_path(&self) -> PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn ignore_path(&self) -> PathBuf {
        self.repository_path().join(IGNORE_FILE)
    }

    pub fn is_initialized(&self) -> bool {
        self.refs.head_path().is_file()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
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

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn custom_ignore(&self) -> Option<&dyn IgnorePredicate> {
        self.ignore.as_deref()
    }

    /// Branch HEAD named when the repository was opened or last switched
    pub fn current_branch(&self) -> Ref<'_, BranchName> {
        self.current_branch.borrow()
    }

    pub fn set_current_branch(&self, branch_name: BranchName) {
        *self.current_branch.borrow_mut() = branch_name;
    }

    /// Re-read HEAD into the cached current branch
    pub fn refresh_current_branch(&self) -> anyhow::Result<()> {
        self.set_current_branch(self.refs.current_branch()?);
        Ok(())
    }
}
