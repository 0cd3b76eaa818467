//! The `settings.toml` file and resolution of paths against CLI flags.
//!
//! Each path resolves with a fixed priority: command-line flag, then the
//! settings file, then a default under the user's data directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tsindex_sync::SyncSettings;

use crate::CliError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Index database file.
    pub database: Option<PathBuf>,
    /// Directory holding resource containers.
    pub containers: Option<PathBuf>,
    /// Remote endpoints.
    pub sync: SyncSettings,
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingSource {
    Flag,
    ConfigFile,
    Default,
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "command line"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Return the path to the settings file.
pub(crate) fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tsindex").join("settings.toml"))
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tsindex")
}

impl Settings {
    /// Load the settings file; a missing file yields the defaults.
    pub(crate) fn load() -> Result<Self, CliError> {
        match settings_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))
    }

    pub(crate) fn database_path(&self, flag: Option<&Path>) -> (PathBuf, SettingSource) {
        resolve(flag, self.database.as_deref(), || data_dir().join("index.db"))
    }

    pub(crate) fn container_root(&self, flag: Option<&Path>) -> (PathBuf, SettingSource) {
        resolve(flag, self.containers.as_deref(), || data_dir().join("containers"))
    }
}

fn resolve(
    flag: Option<&Path>,
    configured: Option<&Path>,
    default: impl FnOnce() -> PathBuf,
) -> (PathBuf, SettingSource) {
    if let Some(path) = flag {
        (path.to_path_buf(), SettingSource::Flag)
    } else if let Some(path) = configured {
        (path.to_path_buf(), SettingSource::ConfigFile)
    } else {
        (default(), SettingSource::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_beats_config_file() {
        let settings = Settings {
            database: Some(PathBuf::from("/from/config.db")),
            ..Settings::default()
        };
        let (path, source) = settings.database_path(Some(Path::new("/from/flag.db")));
        assert_eq!(path, PathBuf::from("/from/flag.db"));
        assert_eq!(source, SettingSource::Flag);

        let (path, source) = settings.database_path(None);
        assert_eq!(path, PathBuf::from("/from/config.db"));
        assert_eq!(source, SettingSource::ConfigFile);
    }

    #[test]
    fn test_default_container_root() {
        let (path, source) = Settings::default().container_root(None);
        assert_eq!(source, SettingSource::Default);
        assert!(path.ends_with("tsindex/containers"));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "containers = \"/srv/containers\"\n\n[sync]\nacademy_manuals = [\"ta-intro\"]\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.containers, Some(PathBuf::from("/srv/containers")));
        assert!(settings.database.is_none());
        assert_eq!(settings.sync.academy_manuals, vec!["ta-intro"]);
        assert!(!settings.sync.primary_catalog_url.is_empty());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "database = [").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(CliError::Config(_))));
    }
}
