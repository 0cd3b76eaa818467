//! Global catalogs: target languages, temp languages, their approvals and
//! new-language questionnaires.
//!
//! Each catalog replaces its table wholesale inside its own transaction.
//! Approvals are processed last so the languages they name are present.

use rusqlite::Connection;
use tsindex_db::{
    Index, add_catalog, add_question, add_questionnaire, add_target_language,
    add_temp_target_language, clear_approved_target_languages, clear_questionnaires,
    clear_target_languages, clear_temp_target_languages, set_approved_target_language,
    set_catalog_modified_at,
};
use tsindex_types::feeds::{ApprovedTempLanguages, LangnamesEntry, QuestionnaireFeed};
use tsindex_types::{Catalog, Question, Questionnaire, TargetLanguage, TempTargetLanguage};

use crate::catalog_sync::clamp_i32;
use crate::client::Fetch;
use crate::error::SyncError;
use crate::progress::SyncProgress;
use crate::settings::{GLOBAL_CATALOGS, SyncSettings};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GlobalReport {
    /// Catalog slugs that were replaced.
    pub updated: Vec<String>,
    /// Approvals naming an unknown language.
    pub skipped_approvals: usize,
    pub cancelled: bool,
}

/// Refresh every registered global catalog.
///
/// With `force`, the catalog rows are (re)registered against the configured
/// host first. Catalogs are applied in order, each in its own transaction.
/// The first failure stops the run: catalogs before it stay updated, the
/// failing one and those after it are left untouched.
pub fn update_catalogs(
    index: &Index,
    fetcher: &dyn Fetch,
    force: bool,
    settings: &SyncSettings,
    progress: &dyn SyncProgress,
) -> Result<GlobalReport, SyncError> {
    if force {
        register_catalogs(index, settings)?;
    }

    let mut report = GlobalReport::default();
    let registered = index.get_catalogs()?;
    for catalog in &registered {
        if !GLOBAL_CATALOGS.contains(&catalog.slug.as_str()) {
            log::debug!("Skipping unknown catalog {}", catalog.slug);
        }
    }

    let pending: Vec<&Catalog> = GLOBAL_CATALOGS
        .iter()
        .filter_map(|slug| registered.iter().find(|c| c.slug == *slug))
        .collect();
    let total = pending.len();

    for (completed, catalog) in pending.into_iter().enumerate() {
        if !progress.on_progress(&catalog.slug, total, completed) {
            report.cancelled = true;
            break;
        }
        let body = fetcher.fetch(&catalog.url)?;

        // An error drops the transaction, leaving this catalog's table as it was.
        let tx = index.transaction()?;
        match catalog.slug.as_str() {
            "langnames" => apply_langnames(&tx, &catalog.url, &body)?,
            "new-language-questions" => apply_questionnaires(&tx, &catalog.url, &body)?,
            "temp-langnames" => apply_temp_langnames(&tx, &catalog.url, &body)?,
            "approved-temp-langnames" => apply_approvals(&tx, &catalog.url, &body, &mut report)?,
            _ => continue,
        }
        set_catalog_modified_at(&tx, &catalog.slug, chrono::Utc::now().timestamp())?;
        tx.commit()?;
        log::info!("Updated {}", catalog.slug);
        report.updated.push(catalog.slug.clone());
    }

    Ok(report)
}

fn register_catalogs(index: &Index, settings: &SyncSettings) -> Result<(), SyncError> {
    let tx = index.transaction()?;
    for slug in GLOBAL_CATALOGS {
        let Some(url) = settings.global_catalog_url(slug) else {
            continue;
        };
        let modified_at = index.get_catalog(slug)?.map_or(0, |c| c.modified_at);
        add_catalog(
            &tx,
            &Catalog {
                slug: slug.to_string(),
                url,
                modified_at,
            },
        )?;
    }
    tx.commit()?;
    Ok(())
}

fn parse<T: serde::de::DeserializeOwned>(url: &str, body: &[u8]) -> Result<T, SyncError> {
    serde_json::from_slice(body).map_err(|e| SyncError::parse(url, e))
}

fn target_language(entry: &LangnamesEntry) -> TargetLanguage {
    TargetLanguage {
        slug: entry.lc.clone(),
        name: entry.ln.clone(),
        anglicized_name: entry.ang.clone(),
        direction: entry.ld.clone(),
        region: entry.lr.clone(),
        is_gateway_language: entry.gl,
    }
}

fn apply_langnames(conn: &Connection, url: &str, body: &[u8]) -> Result<(), SyncError> {
    let entries: Vec<LangnamesEntry> = parse(url, body)?;
    clear_target_languages(conn)?;
    for entry in &entries {
        add_target_language(conn, &target_language(entry))?;
    }
    log::debug!("{} target languages", entries.len());
    Ok(())
}

fn apply_temp_langnames(conn: &Connection, url: &str, body: &[u8]) -> Result<(), SyncError> {
    let entries: Vec<LangnamesEntry> = parse(url, body)?;
    clear_temp_target_languages(conn)?;
    for entry in &entries {
        let temp = TempTargetLanguage {
            language: target_language(entry),
            approved_target_language_slug: None,
        };
        add_temp_target_language(conn, &temp)?;
    }
    log::debug!("{} temp target languages", entries.len());
    Ok(())
}

fn apply_questionnaires(conn: &Connection, url: &str, body: &[u8]) -> Result<(), SyncError> {
    let feed: QuestionnaireFeed = parse(url, body)?;
    clear_questionnaires(conn)?;
    for entry in &feed.languages {
        let questionnaire = Questionnaire {
            td_id: entry.questionnaire_id,
            language_slug: entry.slug.clone(),
            language_name: entry.name.clone(),
            language_direction: entry.dir.clone(),
            data_fields: entry.language_data.clone(),
        };
        let questionnaire_id = add_questionnaire(conn, &questionnaire)?;
        for q in &entry.questions {
            let question = Question {
                td_id: q.id,
                text: q.text.clone(),
                help: q.help.clone(),
                is_required: q.required,
                input_type: q.input_type.clone(),
                sort: clamp_i32(q.sort),
                depends_on: q.depends_on,
            };
            add_question(conn, &question, questionnaire_id)?;
        }
    }
    Ok(())
}

fn apply_approvals(
    conn: &Connection,
    url: &str,
    body: &[u8],
    report: &mut GlobalReport,
) -> Result<(), SyncError> {
    let entries: ApprovedTempLanguages = parse(url, body)?;
    clear_approved_target_languages(conn)?;
    for (temp, approved) in entries.iter().flatten() {
        if !set_approved_target_language(conn, temp, approved)? {
            log::warn!("Skipping approval of {temp} as unknown language {approved}");
            report.skipped_approvals += 1;
        }
    }
    Ok(())
}
