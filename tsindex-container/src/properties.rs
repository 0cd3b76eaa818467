//! The `properties.json` manifest every resource container carries.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tsindex_types::{
    Project, Resource, ResourceFormat, ResourceType, SourceLanguage, TranslateMode, container_slug,
};

use crate::error::ContainerError;

/// Name of the manifest file at the root of a container.
pub const PROPERTIES_FILE: &str = "properties.json";

/// Version of the container layout written by this crate.
pub const PACKAGE_VERSION: &str = "1";

/// Chapter → chunk → translationWords links.
pub type WordAssignmentMap = BTreeMap<String, BTreeMap<String, Vec<String>>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerProperties {
    pub package_version: String,
    #[serde(default)]
    pub modified_at: i64,
    pub content_mime_type: String,
    pub language: LanguageInfo,
    pub project: ProjectInfo,
    pub resource: ResourceInfo,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tw_assignments: WordAssignmentMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub slug: String,
    pub name: String,
    #[serde(default = "ltr")]
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub chunks_url: String,
    /// Category slugs, outermost first.
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub slug: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub translate_mode: TranslateMode,
    #[serde(default)]
    pub status: ResourceStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStatus {
    #[serde(default)]
    pub checking_level: i32,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub pub_date: String,
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub version: String,
}

/// Names that end up in library paths must be one plain file name.
pub(crate) fn check_path_component(what: &str, name: &str) -> Result<(), ContainerError> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    if plain {
        Ok(())
    } else {
        Err(ContainerError::invalid(format!("unsafe {what} '{name}'")))
    }
}

fn ltr() -> String {
    "ltr".to_string()
}

impl ContainerProperties {
    /// Identity of the container these properties describe.
    pub fn slug(&self) -> String {
        container_slug(&self.language.slug, &self.project.slug, &self.resource.slug)
    }

    pub fn read(dir: &Path) -> Result<Self, ContainerError> {
        let path = dir.join(PROPERTIES_FILE);
        if !path.is_file() {
            return Err(ContainerError::invalid(format!(
                "{} has no {PROPERTIES_FILE}",
                dir.display()
            )));
        }
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn parse(contents: &str) -> Result<Self, ContainerError> {
        let properties: Self = serde_json::from_str(contents)?;
        if properties.language.slug.is_empty()
            || properties.project.slug.is_empty()
            || properties.resource.slug.is_empty()
        {
            return Err(ContainerError::invalid(
                "properties must name a language, project and resource",
            ));
        }
        check_path_component("language slug", &properties.language.slug)?;
        check_path_component("project slug", &properties.project.slug)?;
        check_path_component("resource slug", &properties.resource.slug)?;
        Ok(properties)
    }

    pub fn write(&self, dir: &Path) -> Result<(), ContainerError> {
        fs::write(dir.join(PROPERTIES_FILE), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Index rows described by this manifest.
    ///
    /// The resource carries a single container-family format flagged
    /// `imported`, pointing at `url`.
    pub fn to_index_entities(&self, url: &str) -> (SourceLanguage, Project, Resource) {
        let language = SourceLanguage {
            slug: self.language.slug.clone(),
            name: self.language.name.clone(),
            direction: self.language.direction.clone(),
        };
        let project = Project {
            slug: self.project.slug.clone(),
            name: self.project.name.clone(),
            description: self.project.description.clone(),
            icon: self.project.icon.clone(),
            sort: self.project.sort,
            chunks_url: self.project.chunks_url.clone(),
            source_language_slug: self.language.slug.clone(),
        };
        let status = &self.resource.status;
        let resource = Resource {
            slug: self.resource.slug.clone(),
            name: self.resource.name.clone(),
            resource_type: self.resource.resource_type,
            translate_mode: self.resource.translate_mode,
            checking_level: status.checking_level,
            comments: status.comments.clone(),
            pub_date: status.pub_date.clone(),
            license: status.license.clone(),
            version: status.version.clone(),
            formats: vec![ResourceFormat {
                package_version: self.package_version.clone(),
                mime_type: self.resource.resource_type.container_mime_type(),
                modified_at: self.modified_at,
                url: url.to_string(),
                imported: true,
            }],
            words_assignments_url: None,
        };
        (language, project, resource)
    }
}
