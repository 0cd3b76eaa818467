//! SQLite persistence layer for the resource catalog index.
//!
//! Provides the bundled schema, the upsert primitive every write goes
//! through, write operations, the target-language resolver and the read
//! queries exposed by the [`Index`] handle.

pub mod index;
pub mod languages;
pub mod operations;
pub mod queries;
pub mod schema;
pub mod upsert;

pub use index::Index;
pub use languages::{
    add_target_language, add_temp_target_language, clear_approved_target_languages,
    clear_target_languages, clear_temp_target_languages, find_target_language,
    get_approved_target_language, get_target_language, get_target_languages,
    get_temp_target_language, set_approved_target_language,
};
pub use operations::{
    add_catalog, add_category, add_chunk_marker, add_project, add_question, add_questionnaire,
    add_questionnaire_data_field, add_resource, add_resource_format, add_source_language,
    add_versification, clear_chunk_markers, clear_questionnaires, set_catalog_modified_at,
    OperationError,
};
pub use queries::{
    find_translations, get_catalog, get_catalogs, get_category_path, get_chunk_markers,
    get_imported_translations, get_project, get_project_categories, get_projects, get_questionnaires,
    get_questions, get_resource, get_resource_formats, get_resource_types, get_resources,
    get_source_language, get_source_languages, get_translation, get_versifications, stats,
    IndexStats, TranslationFilter,
};
pub use schema::{open_database, open_memory, SchemaError};
pub use upsert::{unique_predicate, upsert, Record};
