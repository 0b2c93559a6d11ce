//! TOML configuration for a `LocalFilesystem`.
//!
//! ```toml
//! location = "/srv/data"
//!
//! [default_permissions]
//! directory = 0o750
//! file = 0o640
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::fs_op::error::{FilesystemError, Result};
use crate::fs_op::options::DefaultPermissions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesystemConfig {
    /// Root every relative path is resolved against.
    pub location: PathBuf,
    #[serde(default)]
    pub default_permissions: DefaultPermissions,
}

impl FilesystemConfig {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        FilesystemConfig {
            location: location.into(),
            default_permissions: DefaultPermissions::default(),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| FilesystemError::new(format!("invalid config: {}", e)))
    }

    /// Read and parse the TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| FilesystemError::io("read", path, e))?;
        let cfg = Self::from_toml_str(&raw)?;
        tracing::debug!(config = %path.display(), location = %cfg.location.display(), "loaded filesystem config");
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| FilesystemError::new(format!("cannot serialize config: {}", e)))
    }
}
