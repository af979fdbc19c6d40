use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::setup_cfg::SetupCfg;

/// One Python project included in the generated environment.
#[derive(Debug)]
pub struct Project {
    path: PathBuf,
    cfg: SetupCfg,
}

impl Project {
    pub fn new(path: PathBuf, cfg: SetupCfg) -> Project {
        Project { path, cfg }
    }

    /// Resolves and parses `setup.cfg` up front; the metadata is read-only
    /// for the rest of the run.
    pub fn open(path: &Path) -> Result<Project> {
        let path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve {}", path.display()))?;
        debug!("reading {}", path.display());

        let src = read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cfg = SetupCfg::parse(&src)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        if cfg.metadata.name.is_none() {
            warn!("{} does not declare a package name", path.display());
        }

        Ok(Project::new(path, cfg))
    }

    pub fn name(&self) -> Option<&str> {
        self.cfg.metadata.name.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.cfg.metadata.version.as_deref()
    }

    pub fn homepage(&self) -> Option<&str> {
        self.cfg.metadata.url.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.cfg.metadata.description.as_deref()
    }

    /// Directory the package sources live in.
    pub fn src_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    // nixpkgs spells dotted python package names with dashes
    pub fn dependencies(&self) -> Vec<String> {
        self.cfg
            .options
            .install_requires
            .iter()
            .map(|dep| dep.replace('.', "-"))
            .collect()
    }
}
