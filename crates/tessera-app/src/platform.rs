//! Platform directory resolution.
//!
//! Follows OS conventions (XDG on Linux, Known Folders on Windows, Library on
//! macOS) for where configuration, cached data and logs live.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while preparing platform directories.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

const APP_NAME: &str = "tessera";

/// OS-specific directories for the tessera host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformDirs {
    /// `config.ron` lives here.
    pub config_dir: PathBuf,
    /// Height-map images and other user assets.
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve directories without touching the disk.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        let app_config = config_base.join(APP_NAME);

        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| app_config.clone())
            .join(APP_NAME);

        Ok(Self {
            config_dir: app_config.join("config"),
            data_dir,
            log_dir: app_config.join("logs"),
        })
    }

    /// Resolve directories rooted under `root`, e.g. a `--config` override.
    pub fn resolve_with_root(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            data_dir: root.join("data"),
            log_dir: root.join("logs"),
        }
    }

    /// Create every directory on disk.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        for dir in [&self.config_dir, &self.data_dir, &self.log_dir] {
            std::fs::create_dir_all(dir).map_err(|source| PlatformError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_absolute_and_app_scoped() {
        // Some CI sandboxes expose no config directory at all.
        let Ok(dirs) = PlatformDirs::resolve() else {
            return;
        };
        for dir in [&dirs.config_dir, &dirs.data_dir, &dirs.log_dir] {
            assert!(dir.is_absolute(), "{} is not absolute", dir.display());
            assert!(dir.components().any(|c| c.as_os_str() == APP_NAME));
        }
    }

    #[test]
    fn test_directory_creation_under_root() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve_with_root(tmp.path());
        dirs.create_dirs().unwrap();

        assert_eq!(dirs.config_dir, tmp.path());
        assert!(dirs.data_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }
}
