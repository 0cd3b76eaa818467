pub(crate) mod browse;
pub(crate) mod config;
pub(crate) mod containers;
pub(crate) mod stats;
pub(crate) mod sync;

use std::path::{Path, PathBuf};

use tsindex_container::ContainerLibrary;
use tsindex_db::Index;
use tsindex_types::{ResourceType, TranslateMode};

use crate::CliError;
use crate::settings::{SettingSource, Settings};

/// Resolved settings shared by every command.
pub(crate) struct Context {
    pub settings: Settings,
    pub db_path: (PathBuf, SettingSource),
    pub container_root: (PathBuf, SettingSource),
    pub quiet: bool,
}

impl Context {
    pub(crate) fn new(
        settings: Settings,
        db_flag: Option<&Path>,
        containers_flag: Option<&Path>,
        quiet: bool,
    ) -> Self {
        Self {
            db_path: settings.database_path(db_flag),
            container_root: settings.container_root(containers_flag),
            settings,
            quiet,
        }
    }

    /// Open the index, creating it (and its directory) on first use.
    pub(crate) fn open_index(&self) -> Result<Index, CliError> {
        let path = &self.db_path.0;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        log::debug!("Opening index at {}", path.display());
        Ok(Index::open(path)?)
    }

    pub(crate) fn library(&self) -> ContainerLibrary {
        ContainerLibrary::new(&self.container_root.0)
    }
}

pub(crate) fn parse_translate_mode(value: &str) -> Result<TranslateMode, CliError> {
    match value.to_lowercase().as_str() {
        "all" => Ok(TranslateMode::All),
        "gl" => Ok(TranslateMode::Gl),
        other => Err(CliError::usage(format!(
            "Unknown translate mode '{other}' (expected all or gl)"
        ))),
    }
}

pub(crate) fn parse_resource_type(value: &str) -> Result<ResourceType, CliError> {
    match value.to_lowercase().as_str() {
        "book" => Ok(ResourceType::Book),
        "help" => Ok(ResourceType::Help),
        "dict" => Ok(ResourceType::Dict),
        "man" => Ok(ResourceType::Man),
        "bundle" => Ok(ResourceType::Bundle),
        other => Err(CliError::usage(format!("Unknown resource type '{other}'"))),
    }
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate_mode() {
        assert_eq!(parse_translate_mode("GL").unwrap(), TranslateMode::Gl);
        assert_eq!(parse_translate_mode("all").unwrap(), TranslateMode::All);
        assert!(matches!(parse_translate_mode("some"), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_parse_resource_type() {
        assert_eq!(parse_resource_type("Dict").unwrap(), ResourceType::Dict);
        assert!(parse_resource_type("audio").is_err());
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Genesis", 10), "Genesis");
        assert_eq!(truncate_str("Deuteronomy", 8), "Deute...");
        assert_eq!(truncate_str("Ésaïe", 3), "Ésa");
    }
}
