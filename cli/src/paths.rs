//! Path utilities for voxgate.

use std::io;
use std::path::PathBuf;

/// Default base directory name under the user's home.
pub const DEFAULT_BASE_DIR: &str = ".voxgate";

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Enrollment registry filename.
pub const REGISTRY_FILE: &str = "users.yaml";

/// Provides access to the voxgate directory structure.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory (normally ~/.voxgate).
    pub base_dir: PathBuf,
}

impl Paths {
    /// Resolves paths under the user's home directory.
    pub fn new() -> io::Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "could not find home directory")
        })?;
        Ok(Self::with_base(home_dir.join(DEFAULT_BASE_DIR)))
    }

    /// Uses `base_dir` as the root instead of ~/.voxgate.
    pub fn with_base(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the config file path (~/.voxgate/config.yaml).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join(DEFAULT_CONFIG_FILE)
    }

    /// Returns the enrollment registry path (~/.voxgate/users.yaml).
    pub fn registry_file(&self) -> PathBuf {
        self.base_dir.join(REGISTRY_FILE)
    }

    /// Returns the default enrollment audio directory (~/.voxgate/data).
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }
}
