//! Write operations for every indexed entity.
//!
//! All inserts and updates go through [`upsert`](crate::upsert::upsert);
//! deletes only happen in the explicit `clear_*` operations.

use rusqlite::Connection;
use thiserror::Error;
use tsindex_types::*;

use crate::upsert::{Record, upsert};

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Lost update race on '{table}' ({key}); the row vanished between insert and update")]
    LostRace { table: String, key: String },
    #[error("Record for '{table}' is missing unique column '{column}'")]
    MissingUniqueColumn { table: String, column: String },
    #[error("Unknown target language '{0}'")]
    UnknownTargetLanguage(String),
    #[error("Resource '{resource}' has no formats")]
    ResourceWithoutFormats { resource: String },
}

// ── Source Languages ────────────────────────────────────────────────────────

pub fn add_source_language(
    conn: &Connection,
    language: &SourceLanguage,
) -> Result<i64, OperationError> {
    let record = Record::new("source_language")
        .text("slug", &language.slug)
        .text("name", &language.name)
        .text("direction", &language.direction);
    upsert(conn, &record, &["slug"])
}

// ── Categories ──────────────────────────────────────────────────────────────

/// Index a category under `parent_id` with its name in one language.
pub fn add_category(
    conn: &Connection,
    category: &Category,
    parent_id: i64,
    source_language_id: i64,
) -> Result<i64, OperationError> {
    let record = Record::new("category")
        .text("slug", &category.slug)
        .set("parent_id", parent_id);
    let category_id = upsert(conn, &record, &["slug", "parent_id"])?;

    let name = Record::new("category_name")
        .set("source_language_id", source_language_id)
        .set("category_id", category_id)
        .text("name", &category.name);
    upsert(conn, &name, &["source_language_id", "category_id"])?;

    Ok(category_id)
}

// ── Projects ────────────────────────────────────────────────────────────────

/// Index a project for one source language.
///
/// `categories` is the chain from the outermost category inwards; each one
/// is nested under the previous and the project is linked to the last.
pub fn add_project(
    conn: &Connection,
    project: &Project,
    categories: &[Category],
    source_language_id: i64,
) -> Result<i64, OperationError> {
    let record = Record::new("project")
        .text("slug", &project.slug)
        .text("name", &project.name)
        .text("description", &project.description)
        .text("icon", &project.icon)
        .set("sort", project.sort)
        .text("chunks_url", &project.chunks_url)
        .set("source_language_id", source_language_id);
    let project_id = upsert(conn, &record, &["slug", "source_language_id"])?;

    let mut parent_id = ROOT_CATEGORY_ID;
    for category in categories {
        parent_id = add_category(conn, category, parent_id, source_language_id)?;
    }
    if parent_id != ROOT_CATEGORY_ID {
        let link = Record::new("project_category")
            .set("project_id", project_id)
            .set("category_id", parent_id);
        upsert(conn, &link, &["project_id", "category_id"])?;
    }

    Ok(project_id)
}

// ── Resources ───────────────────────────────────────────────────────────────

/// Index a resource together with its formats.
///
/// A resource must carry at least one format. The legacy word-assignment
/// URL, when present, is stored alongside.
pub fn add_resource(
    conn: &Connection,
    resource: &Resource,
    project_id: i64,
) -> Result<i64, OperationError> {
    if resource.formats.is_empty() {
        return Err(OperationError::ResourceWithoutFormats {
            resource: resource.slug.clone(),
        });
    }

    let record = Record::new("resource")
        .text("slug", &resource.slug)
        .text("name", &resource.name)
        .text("type", resource.resource_type.as_str())
        .text("translate_mode", resource.translate_mode.as_str())
        .set("checking_level", resource.checking_level)
        .text("comments", &resource.comments)
        .text("pub_date", &resource.pub_date)
        .text("license", &resource.license)
        .text("version", &resource.version)
        .set("project_id", project_id);
    let resource_id = upsert(conn, &record, &["slug", "project_id"])?;

    for format in &resource.formats {
        add_resource_format(conn, format, resource_id)?;
    }

    if let Some(url) = &resource.words_assignments_url {
        let info = Record::new("legacy_resource_info")
            .text("translation_words_assignments_url", url)
            .set("resource_id", resource_id);
        upsert(conn, &info, &["resource_id"])?;
    }

    Ok(resource_id)
}

pub fn add_resource_format(
    conn: &Connection,
    format: &ResourceFormat,
    resource_id: i64,
) -> Result<i64, OperationError> {
    let record = Record::new("resource_format")
        .text("package_version", &format.package_version)
        .text("mime_type", &format.mime_type)
        .set("modified_at", format.modified_at)
        .text("url", &format.url)
        .set("imported", format.imported)
        .set("resource_id", resource_id);
    upsert(conn, &record, &["mime_type", "resource_id"])
}

// ── Catalogs ────────────────────────────────────────────────────────────────

pub fn add_catalog(conn: &Connection, catalog: &Catalog) -> Result<i64, OperationError> {
    let record = Record::new("catalog")
        .text("slug", &catalog.slug)
        .text("url", &catalog.url)
        .set("modified_at", catalog.modified_at);
    upsert(conn, &record, &["slug"])
}

/// Stamp a catalog as processed at `modified_at`.
pub fn set_catalog_modified_at(
    conn: &Connection,
    slug: &str,
    modified_at: i64,
) -> Result<(), OperationError> {
    conn.execute(
        "UPDATE catalog SET modified_at = ?2 WHERE slug = ?1",
        rusqlite::params![slug, modified_at],
    )?;
    Ok(())
}

// ── Versifications & Chunks ─────────────────────────────────────────────────

pub fn add_versification(
    conn: &Connection,
    versification: &Versification,
    source_language_id: i64,
) -> Result<i64, OperationError> {
    let record = Record::new("versification").text("slug", &versification.slug);
    let versification_id = upsert(conn, &record, &["slug"])?;

    let name = Record::new("versification_name")
        .set("source_language_id", source_language_id)
        .set("versification_id", versification_id)
        .text("name", &versification.name);
    upsert(conn, &name, &["source_language_id", "versification_id"])?;

    Ok(versification_id)
}

pub fn add_chunk_marker(
    conn: &Connection,
    marker: &ChunkMarker,
    project_slug: &str,
    versification_id: i64,
) -> Result<i64, OperationError> {
    let record = Record::new("chunk_marker")
        .text("chapter", &marker.chapter)
        .text("verse", &marker.verse)
        .text("project_slug", project_slug)
        .set("versification_id", versification_id);
    upsert(
        conn,
        &record,
        &["project_slug", "versification_id", "chapter", "verse"],
    )
}

// ── Questionnaires ──────────────────────────────────────────────────────────

/// Index a questionnaire and its language data-field mapping.
pub fn add_questionnaire(
    conn: &Connection,
    questionnaire: &Questionnaire,
) -> Result<i64, OperationError> {
    let record = Record::new("questionnaire")
        .set("td_id", questionnaire.td_id)
        .text("language_slug", &questionnaire.language_slug)
        .text("language_name", &questionnaire.language_name)
        .text("language_direction", &questionnaire.language_direction);
    let questionnaire_id = upsert(conn, &record, &["td_id"])?;

    for (field, question_td_id) in &questionnaire.data_fields {
        add_questionnaire_data_field(conn, field, *question_td_id, questionnaire_id)?;
    }

    Ok(questionnaire_id)
}

pub fn add_question(
    conn: &Connection,
    question: &Question,
    questionnaire_id: i64,
) -> Result<i64, OperationError> {
    let record = Record::new("question")
        .text("text", &question.text)
        .text("help", &question.help)
        .set("is_required", question.is_required)
        .text("input_type", &question.input_type)
        .set("sort", question.sort)
        .set("depends_on", question.depends_on)
        .set("td_id", question.td_id)
        .set("questionnaire_id", questionnaire_id);
    upsert(conn, &record, &["td_id", "questionnaire_id"])
}

pub fn add_questionnaire_data_field(
    conn: &Connection,
    field: &str,
    question_td_id: i64,
    questionnaire_id: i64,
) -> Result<i64, OperationError> {
    let record = Record::new("questionnaire_data_field")
        .text("field", field)
        .set("question_td_id", question_td_id)
        .set("questionnaire_id", questionnaire_id);
    upsert(conn, &record, &["field", "questionnaire_id"])
}

// ── Clear ───────────────────────────────────────────────────────────────────

/// Remove every questionnaire with its questions and data fields.
pub fn clear_questionnaires(conn: &Connection) -> Result<usize, OperationError> {
    Ok(conn.execute("DELETE FROM questionnaire", [])?)
}

/// Remove every chunk marker of one project.
pub fn clear_chunk_markers(conn: &Connection, project_slug: &str) -> Result<usize, OperationError> {
    Ok(conn.execute(
        "DELETE FROM chunk_marker WHERE project_slug = ?1",
        [project_slug],
    )?)
}
