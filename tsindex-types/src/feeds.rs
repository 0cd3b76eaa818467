//! Typed shapes of the remote catalog feeds.
//!
//! The legacy feeds are loosely typed (numbers sometimes arrive as strings,
//! optional fields are omitted or null), so every optional field carries an
//! explicit default instead of being probed at runtime.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

// ── Lenient scalars ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

/// Accept `3`, `3.0`, `"3"` or null; anything unparsable becomes 0.
pub fn lenient_int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(match Option::<Scalar>::deserialize(d)? {
        Some(Scalar::Int(n)) => n,
        Some(Scalar::Float(f)) => f as i64,
        Some(Scalar::Bool(b)) => i64::from(b),
        Some(Scalar::Str(s)) => s.trim().parse().unwrap_or(0),
        None => 0,
    })
}

/// Accept a string, number or null as a string.
pub fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Option::<Scalar>::deserialize(d)? {
        Some(Scalar::Int(n)) => n.to_string(),
        Some(Scalar::Float(f)) => f.to_string(),
        Some(Scalar::Bool(b)) => b.to_string(),
        Some(Scalar::Str(s)) => s,
        None => String::new(),
    })
}

/// Accept `true`, `1`, `"true"`, `"1"`; everything else is false.
pub fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Option::<Scalar>::deserialize(d)? {
        Some(Scalar::Bool(b)) => b,
        Some(Scalar::Int(n)) => n != 0,
        Some(Scalar::Float(f)) => f != 0.0,
        Some(Scalar::Str(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes"),
        None => false,
    })
}

/// Accept an integer id, a numeric string, or null.
fn lenient_opt_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<Scalar>::deserialize(d)? {
        Some(Scalar::Int(n)) => Some(n),
        Some(Scalar::Float(f)) => Some(f as i64),
        Some(Scalar::Str(s)) => s.trim().parse().ok(),
        Some(Scalar::Bool(_)) | None => None,
    })
}

// ── Primary catalog ─────────────────────────────────────────────────────────

/// One project of the primary catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryCatalogEntry {
    pub slug: String,
    /// URL of this project's per-language catalog.
    pub lang_catalog: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub sort: i64,
    /// Category slugs, outermost first.
    #[serde(default)]
    pub meta: Vec<String>,
}

/// One language of a project's language catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageCatalogEntry {
    pub language: FeedLanguage,
    pub project: FeedProject,
    /// URL of this language's resource catalog.
    pub res_catalog: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedLanguage {
    pub slug: String,
    pub name: String,
    #[serde(default = "ltr")]
    pub direction: String,
}

fn ltr() -> String {
    "ltr".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedProject {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    /// Localized category names, parallel to the primary entry's `meta`.
    #[serde(default)]
    pub meta: Vec<String>,
}

/// One raw legacy resource of a language's resource catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceCatalogEntry {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub status: FeedStatus,
    pub source: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub checking_questions: Option<String>,
    #[serde(default)]
    pub terms: Option<String>,
    #[serde(default)]
    pub tw_cat: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub date_modified: i64,
}

/// Checking status block shared by resources and manuals.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedStatus {
    #[serde(default, deserialize_with = "lenient_int")]
    pub checking_level: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub comments: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub publish_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub license: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: String,
}

// ── translationAcademy ──────────────────────────────────────────────────────

/// A translationAcademy manual volume.
#[derive(Debug, Clone, Deserialize)]
pub struct AcademyManual {
    pub meta: AcademyMeta,
    #[serde(default)]
    pub articles: Vec<AcademyArticle>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AcademyMeta {
    pub language: AcademyLanguage,
    #[serde(default)]
    pub manual: String,
    #[serde(default)]
    pub manual_title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub volume: String,
    #[serde(default)]
    pub status: FeedStatus,
    #[serde(rename = "mod", default, deserialize_with = "lenient_int")]
    pub modified_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AcademyLanguage {
    pub lc: String,
    #[serde(default)]
    pub ln: String,
    #[serde(default = "ltr")]
    pub ld: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AcademyArticle {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub question: String,
    #[serde(rename = "ref", default)]
    pub reference: String,
    #[serde(default)]
    pub text: String,
}

// ── Chunks ──────────────────────────────────────────────────────────────────

/// A chunk boundary from a project's chunks feed.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub chp: String,
    #[serde(deserialize_with = "lenient_string")]
    pub firstvs: String,
}

// ── Global catalogs ─────────────────────────────────────────────────────────

/// One entry of the `langnames` / `temp-langnames` feeds.
#[derive(Debug, Clone, Deserialize)]
pub struct LangnamesEntry {
    pub lc: String,
    pub ln: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ang: String,
    #[serde(default = "ltr")]
    pub ld: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lr: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub gl: bool,
}

/// The `new-language-questions` feed.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionnaireFeed {
    #[serde(default)]
    pub languages: Vec<QuestionnaireEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionnaireEntry {
    pub slug: String,
    pub name: String,
    #[serde(default = "ltr")]
    pub dir: String,
    #[serde(deserialize_with = "lenient_int")]
    pub questionnaire_id: i64,
    #[serde(default)]
    pub language_data: BTreeMap<String, i64>,
    #[serde(default)]
    pub questions: Vec<QuestionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionEntry {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub help: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub required: bool,
    #[serde(default)]
    pub input_type: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub sort: i64,
    #[serde(default, deserialize_with = "lenient_opt_int")]
    pub depends_on: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub id: i64,
}

/// The `approved-temp-langnames` feed: single-key `{temp: approved}` maps.
pub type ApprovedTempLanguages = Vec<BTreeMap<String, String>>;

// ── Legacy payloads ─────────────────────────────────────────────────────────

/// A legacy book or OBS payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyBook {
    #[serde(default)]
    pub chapters: Vec<LegacyChapter>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub date_modified: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyChapter {
    #[serde(deserialize_with = "lenient_string")]
    pub number: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "ref", default)]
    pub reference: String,
    #[serde(default)]
    pub frames: Vec<LegacyFrame>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyFrame {
    /// `"<chapter>-<chunk>"`.
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub img: String,
}

/// Notes for one chunk (`[{id, tn:[...]}]`).
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyNoteChunk {
    pub id: String,
    #[serde(default)]
    pub tn: Vec<LegacyNote>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyNote {
    #[serde(rename = "ref", default)]
    pub reference: String,
    #[serde(default)]
    pub text: String,
}

/// Checking questions for one chapter (`[{id, cq:[...]}]`).
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyQuestionChapter {
    pub id: String,
    #[serde(default)]
    pub cq: Vec<LegacyQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyQuestion {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub a: String,
    /// Chunk ids (`"<chapter>-<chunk>"`) the question applies to.
    #[serde(rename = "ref", default)]
    pub references: Vec<String>,
}

/// One translationWords entry.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyWord {
    pub id: String,
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub def_title: String,
    #[serde(default)]
    pub def: String,
    #[serde(default)]
    pub cf: Vec<String>,
}

/// The translation-word assignment side-channel (`tw_cat`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordAssignments {
    #[serde(default)]
    pub chapters: Vec<WordAssignmentChapter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordAssignmentChapter {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default)]
    pub frames: Vec<WordAssignmentFrame>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordAssignmentFrame {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default)]
    pub items: Vec<WordAssignmentItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordAssignmentItem {
    pub id: String,
}
