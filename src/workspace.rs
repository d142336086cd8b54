//! Locating and loading the workspace's `.pdsc` file.
//!
//! # Example
//!
//! ```rust,no_run
//! use pdsc_picker::workspace::Workspace;
//!
//! let workspace = Workspace::new(vec!["/home/user/firmware".into()]);
//! let sub_families = workspace.load_sub_families()?;
//! println!("{} sub-families", sub_families.len());
//! # Ok::<(), pdsc_picker::Error>(())
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::extract::extract;
use crate::objects::SubFamilies;
use crate::tree;

/// Default name of the package description file.
pub const DEFAULT_PDSC_FILE_NAME: &str = "devices.pdsc";

/// Settings for locating the description file inside a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// File name looked up in the first workspace folder
    pub file_name: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_PDSC_FILE_NAME.to_string(),
        }
    }
}

/// The set of open workspace folders, in the order they were opened.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    folders: Vec<PathBuf>,
    config: WorkspaceConfig,
}

impl Workspace {
    /// Creates a workspace with the default configuration.
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self::with_config(folders, WorkspaceConfig::default())
    }

    /// Creates a workspace with a custom configuration.
    pub fn with_config(folders: Vec<PathBuf>, config: WorkspaceConfig) -> Self {
        Self { folders, config }
    }

    /// Returns the open folders.
    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Resolves the description file path in the first folder.
    ///
    /// Fails with [`Error::NoWorkspaceOpen`] if there are no folders. The
    /// file itself is not touched.
    pub fn pdsc_path(&self) -> Result<PathBuf> {
        let root = self.folders.first().ok_or(Error::NoWorkspaceOpen)?;
        Ok(root.join(&self.config.file_name))
    }

    /// Reads, parses and extracts the description file of this workspace.
    pub fn load_sub_families(&self) -> Result<SubFamilies> {
        let path = self.pdsc_path()?;
        load_file(&path)
    }
}

/// Reads, parses and extracts a description file at an explicit path.
///
/// Fails with [`Error::FileNotFound`] if nothing exists at `path`.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<SubFamilies> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading package description");

    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let document = tree::parse(BufReader::new(file))?;
    let sub_families = extract(&document)?;

    debug!(
        sub_families = sub_families.len(),
        devices = sub_families.device_count(),
        "extracted device hierarchy"
    );
    Ok(sub_families)
}
