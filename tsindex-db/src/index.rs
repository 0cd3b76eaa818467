//! The `Index` handle: one open index database plus its read API.

use std::path::Path;

use rusqlite::{Connection, Transaction};
use tsindex_types::*;

use crate::languages;
use crate::operations::OperationError;
use crate::queries::{self, IndexStats, TranslationFilter};
use crate::schema::{self, SchemaError};

/// An open resource catalog index.
///
/// Writers open a transaction with [`Index::transaction`] and call the free
/// functions in [`operations`](crate::operations) and
/// [`languages`](crate::languages) against it. With a file-backed index
/// readers on other connections keep a consistent snapshot until it commits.
pub struct Index {
    conn: Connection,
}

impl Index {
    pub fn open(path: &Path) -> Result<Self, SchemaError> {
        Ok(Self {
            conn: schema::open_database(path)?,
        })
    }

    pub fn open_memory() -> Result<Self, SchemaError> {
        Ok(Self {
            conn: schema::open_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction; dropping it without `commit` rolls back.
    pub fn transaction(&self) -> Result<Transaction<'_>, OperationError> {
        Ok(self.conn.unchecked_transaction()?)
    }

    /// Close the underlying connection.
    pub fn close(self) -> Result<(), OperationError> {
        self.conn.close().map_err(|(_, e)| OperationError::Sqlite(e))
    }

    // ── Translations ────────────────────────────────────────────────────────

    pub fn find_translations(
        &self,
        filter: &TranslationFilter,
    ) -> Result<Vec<Translation>, OperationError> {
        queries::find_translations(&self.conn, filter)
    }

    pub fn get_imported_translations(&self) -> Result<Vec<Translation>, OperationError> {
        queries::get_imported_translations(&self.conn)
    }

    pub fn get_translation(&self, container_slug: &str) -> Result<Option<Translation>, OperationError> {
        queries::get_translation(&self.conn, container_slug)
    }

    // ── Languages & Projects ────────────────────────────────────────────────

    pub fn get_source_language(&self, slug: &str) -> Result<Option<SourceLanguage>, OperationError> {
        queries::get_source_language(&self.conn, slug)
    }

    pub fn get_source_languages(&self) -> Result<Vec<SourceLanguage>, OperationError> {
        queries::get_source_languages(&self.conn)
    }

    pub fn get_projects(
        &self,
        language: &str,
        enable_default_language: bool,
    ) -> Result<Vec<Project>, OperationError> {
        queries::get_projects(&self.conn, language, enable_default_language)
    }

    pub fn get_project(
        &self,
        language: &str,
        slug: &str,
        enable_default_language: bool,
    ) -> Result<Option<Project>, OperationError> {
        queries::get_project(&self.conn, language, slug, enable_default_language)
    }

    pub fn get_project_categories(
        &self,
        parent_id: i64,
        language: &str,
        translate_mode: Option<TranslateMode>,
    ) -> Result<Vec<ProjectCategory>, OperationError> {
        queries::get_project_categories(&self.conn, parent_id, language, translate_mode)
    }

    pub fn get_category_path(
        &self,
        language: &str,
        project_slug: &str,
    ) -> Result<Vec<Category>, OperationError> {
        queries::get_category_path(&self.conn, language, project_slug)
    }

    // ── Resources ───────────────────────────────────────────────────────────

    pub fn get_resource(
        &self,
        language: &str,
        project: &str,
        resource: &str,
    ) -> Result<Option<Resource>, OperationError> {
        queries::get_resource(&self.conn, language, project, resource)
    }

    pub fn get_resources(&self, language: &str, project: &str) -> Result<Vec<Resource>, OperationError> {
        queries::get_resources(&self.conn, language, project)
    }

    pub fn get_resource_formats(
        &self,
        language: &str,
        project: &str,
        resource: &str,
    ) -> Result<Vec<ResourceFormat>, OperationError> {
        queries::get_resource_formats(&self.conn, language, project, resource)
    }

    pub fn get_resource_types(&self) -> Result<Vec<ResourceType>, OperationError> {
        queries::get_resource_types(&self.conn)
    }

    // ── Catalogs, Chunks, Questionnaires ────────────────────────────────────

    pub fn get_catalog(&self, slug: &str) -> Result<Option<Catalog>, OperationError> {
        queries::get_catalog(&self.conn, slug)
    }

    pub fn get_catalogs(&self) -> Result<Vec<Catalog>, OperationError> {
        queries::get_catalogs(&self.conn)
    }

    pub fn get_versifications(&self, language: &str) -> Result<Vec<Versification>, OperationError> {
        queries::get_versifications(&self.conn, language)
    }

    pub fn get_chunk_markers(
        &self,
        project_slug: &str,
        versification_slug: &str,
    ) -> Result<Vec<ChunkMarker>, OperationError> {
        queries::get_chunk_markers(&self.conn, project_slug, versification_slug)
    }

    pub fn get_questionnaires(&self) -> Result<Vec<Questionnaire>, OperationError> {
        queries::get_questionnaires(&self.conn)
    }

    pub fn get_questions(&self, questionnaire_td_id: i64) -> Result<Vec<Question>, OperationError> {
        queries::get_questions(&self.conn, questionnaire_td_id)
    }

    // ── Target Languages ────────────────────────────────────────────────────

    pub fn get_target_languages(&self) -> Result<Vec<TargetLanguage>, OperationError> {
        languages::get_target_languages(&self.conn)
    }

    pub fn get_target_language(&self, slug: &str) -> Result<Option<TargetLanguage>, OperationError> {
        languages::get_target_language(&self.conn, slug)
    }

    pub fn get_temp_target_language(
        &self,
        slug: &str,
    ) -> Result<Option<TempTargetLanguage>, OperationError> {
        languages::get_temp_target_language(&self.conn, slug)
    }

    pub fn get_approved_target_language(
        &self,
        temp_slug: &str,
    ) -> Result<Option<TargetLanguage>, OperationError> {
        languages::get_approved_target_language(&self.conn, temp_slug)
    }

    pub fn find_target_language(&self, query: &str) -> Result<Vec<TargetLanguage>, OperationError> {
        languages::find_target_language(&self.conn, query)
    }

    pub fn stats(&self) -> Result<IndexStats, OperationError> {
        queries::stats(&self.conn)
    }
}
