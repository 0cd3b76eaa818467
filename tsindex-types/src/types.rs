//! Data model types for the resource catalog index.
//!
//! These types represent the persistent index schema: source languages,
//! projects, categories, resources and their formats, target languages,
//! catalogs, versifications, chunk markers and questionnaires.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Source Language ─────────────────────────────────────────────────────────

/// A language that source content is written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLanguage {
    pub slug: String,
    pub name: String,
    #[serde(default = "default_direction")]
    pub direction: String,
}

fn default_direction() -> String {
    "ltr".to_string()
}

// ── Project ─────────────────────────────────────────────────────────────────

/// A translatable work (a Bible book, OBS, a translationAcademy manual...).
///
/// Projects are stored once per source language; `source_language_slug` is
/// filled in by queries and ignored on write.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Project {
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
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_language_slug: String,
}

// ── Category ────────────────────────────────────────────────────────────────

/// Id of the synthetic root every category tree hangs from.
pub const ROOT_CATEGORY_ID: i64 = 0;

/// A category to be indexed along with its name in one source language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub slug: String,
    pub name: String,
}

/// One node of a category/project tree level.
///
/// Category nodes have an empty `project_slug`; project nodes carry the
/// id of the category they belong to in `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCategory {
    pub category_id: i64,
    pub category_slug: String,
    pub project_slug: String,
    pub source_language_slug: String,
    pub parent_id: i64,
    pub name: String,
    pub icon: String,
    pub sort: i32,
}

impl ProjectCategory {
    pub fn is_project(&self) -> bool {
        !self.project_slug.is_empty()
    }

    /// Slug of whatever this node represents.
    pub fn slug(&self) -> &str {
        if self.is_project() {
            &self.project_slug
        } else {
            &self.category_slug
        }
    }
}

// ── Resource ────────────────────────────────────────────────────────────────

/// Coarse eligibility tag controlling who may translate a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslateMode {
    /// Offered to every translator.
    All,
    /// Gateway-language workflows only.
    Gl,
}

impl TranslateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Gl => "gl",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "all" => Self::All,
            _ => Self::Gl,
        }
    }

    /// Translate mode for a resource slug from the legacy catalog.
    ///
    /// The legacy feed carries no mode, so a small whitelist of resources
    /// is opened to everyone and the rest is reserved for gateway languages.
    pub fn for_legacy_slug(resource_slug: &str) -> Self {
        match resource_slug.to_lowercase().as_str() {
            "obs" | "ulb" | "reg" => Self::All,
            _ => Self::Gl,
        }
    }
}

/// Kind of content a resource holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Book,
    Help,
    Dict,
    Man,
    Bundle,
}

impl Default for ResourceType {
    fn default() -> Self {
        Self::Book
    }
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Help => "help",
            Self::Dict => "dict",
            Self::Man => "man",
            Self::Bundle => "bundle",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "help" => Self::Help,
            "dict" => Self::Dict,
            "man" => Self::Man,
            "bundle" => Self::Bundle,
            _ => Self::Book,
        }
    }

    /// MIME type of the legacy (pre-container) rendition of this type.
    pub fn legacy_mime_type(&self) -> String {
        format!("{LEGACY_MIME_PREFIX}{}", self.as_str())
    }

    /// MIME type of a canonical resource container of this type.
    pub fn container_mime_type(&self) -> String {
        format!("{CONTAINER_MIME_PREFIX}{}", self.as_str())
    }
}

/// MIME prefix of legacy payloads that can be converted into containers.
pub const LEGACY_MIME_PREFIX: &str = "application/ts+";

/// MIME prefix of canonical resource containers.
pub const CONTAINER_MIME_PREFIX: &str = "application/tsrc+";

/// Whether a format's MIME type belongs to the resource-container family.
///
/// Everything else (audio, video, pdf) is a binary rendition.
pub fn is_container_mime_type(mime_type: &str) -> bool {
    mime_type.starts_with(LEGACY_MIME_PREFIX) || mime_type.starts_with(CONTAINER_MIME_PREFIX)
}

/// A specific edition/checking level of a project's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub slug: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub resource_type: ResourceType,
    #[serde(default = "default_translate_mode")]
    pub translate_mode: TranslateMode,
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
    #[serde(skip)]
    pub formats: Vec<ResourceFormat>,
    /// Legacy side-channel: where the translation-word assignments live.
    #[serde(skip)]
    pub words_assignments_url: Option<String>,
}

fn default_translate_mode() -> TranslateMode {
    TranslateMode::Gl
}

/// A downloadable rendition of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFormat {
    pub package_version: String,
    pub mime_type: String,
    pub modified_at: i64,
    pub url: String,
    #[serde(default)]
    pub imported: bool,
}

// ── Translation ─────────────────────────────────────────────────────────────

/// A read-only composite of language, project and resource.
///
/// Only ever produced by queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub language: SourceLanguage,
    pub project: Project,
    pub resource: Resource,
}

impl Translation {
    pub fn resource_container_slug(&self) -> String {
        crate::slug::container_slug(&self.language.slug, &self.project.slug, &self.resource.slug)
    }
}

// ── Target Languages ────────────────────────────────────────────────────────

/// A language users translate into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLanguage {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub anglicized_name: String,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub is_gateway_language: bool,
}

/// A provisional target language not (yet) in the canonical registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempTargetLanguage {
    pub language: TargetLanguage,
    /// Canonical slug this temporary code has been approved as.
    pub approved_target_language_slug: Option<String>,
}

// ── Catalogs ────────────────────────────────────────────────────────────────

/// A remote feed descriptor driving one synchronization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub slug: String,
    pub url: String,
    pub modified_at: i64,
}

// ── Versification & Chunks ──────────────────────────────────────────────────

/// A chapter/verse numbering system with its name in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versification {
    pub slug: String,
    pub name: String,
}

/// A translation-unit boundary within a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkMarker {
    pub chapter: String,
    pub verse: String,
}

// ── Questionnaires ──────────────────────────────────────────────────────────

/// A new-target-language onboarding survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Questionnaire {
    /// Server-assigned id.
    pub td_id: i64,
    pub language_slug: String,
    pub language_name: String,
    pub language_direction: String,
    /// Maps a language data field (e.g. "ln") to the question answering it.
    pub data_fields: BTreeMap<String, i64>,
}

/// One question of a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub td_id: i64,
    pub text: String,
    pub help: String,
    pub is_required: bool,
    pub input_type: String,
    pub sort: i32,
    pub depends_on: Option<i64>,
}
