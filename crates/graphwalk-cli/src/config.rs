//! Configuration file handling.
//!
//! Settings are read from the file named by `--config`, else from
//! `graphwalk.yaml` in the working directory when it exists, else defaults.
//! Command-line flags take precedence over all of these.

use crate::error::{Error, Result};
use graphwalk::{Connectivity, Direction, IndexBase, Traversal};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "graphwalk.yaml";

/// Persistent defaults for the CLI.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Numbering of node ids in graph input and output.
    pub index_base: IndexBase,

    /// Whether text edge lists describe directed graphs.
    pub directed: bool,

    /// Cell adjacency for `grid islands`.
    pub connectivity: Connectivity,

    /// Default strategy where BFS and DFS are interchangeable.
    pub traversal: Traversal,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it is not valid configuration YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Save configuration to a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails and [`Error::Io`] if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist; the implicit `graphwalk.yaml` in `dir` is
    /// optional.
    ///
    /// # Errors
    ///
    /// Propagates [`Config::load`] errors.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "Loading configuration");
            return Self::load(path);
        }

        let implicit = dir.join(CONFIG_FILE_NAME);
        if implicit.is_file() {
            tracing::debug!(path = %implicit.display(), "Loading configuration");
            Self::load(&implicit)
        } else {
            tracing::debug!("No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Direction implied by the `directed` key.
    #[must_use]
    pub fn direction(&self) -> Direction {
        if self.directed {
            Direction::Directed
        } else {
            Direction::Undirected
        }
    }
}
