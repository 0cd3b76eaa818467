//! Synchronization of the legacy source catalog into the index.
//!
//! The primary catalog lists projects; each project points at a catalog of
//! its languages, and each language at a catalog of resources. Inline help
//! content (notes, questions, words) is split out into sibling resources.
//! translationAcademy manuals are fetched afterwards from their own feeds.

use rusqlite::Connection;
use tsindex_container::properties::PACKAGE_VERSION;
use tsindex_db::{Index, add_project, add_resource, add_source_language};
use tsindex_types::feeds::{
    AcademyManual, FeedStatus, LanguageCatalogEntry, PrimaryCatalogEntry, ResourceCatalogEntry,
};
use tsindex_types::{
    Category, Project, Resource, ResourceFormat, ResourceType, SourceLanguage, TranslateMode,
};

use crate::client::{Fetch, fetch_json};
use crate::error::SyncError;
use crate::progress::SyncProgress;
use crate::settings::SyncSettings;

/// Category slugs marking a project as a Bible book.
const BIBLE_CATEGORIES: [&str; 2] = ["bible-ot", "bible-nt"];

/// Category every translationAcademy manual is filed under.
const ACADEMY_CATEGORY: &str = "ta";

/// Counts of what a synchronization indexed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub projects: usize,
    pub languages: usize,
    pub resources: usize,
    pub manuals: usize,
    /// The progress callback asked to stop before every unit was processed.
    pub cancelled: bool,
}

/// Mirror the remote source catalog into the index.
///
/// Everything runs in one transaction: an error rolls back every write,
/// while a cancellation keeps what was written so far.
pub fn synchronize_sources(
    index: &Index,
    fetcher: &dyn Fetch,
    primary_url: &str,
    settings: &SyncSettings,
    progress: &dyn SyncProgress,
) -> Result<SyncReport, SyncError> {
    let tx = index.transaction()?;
    let mut report = SyncReport::default();

    progress.on_phase("Fetching primary catalog");
    let primary: Vec<PrimaryCatalogEntry> = fetch_json(fetcher, primary_url)?;
    let total = primary.len() + settings.academy_manuals.len();
    let mut completed = 0;

    for entry in &primary {
        if !progress.on_progress(&entry.slug, total, completed) {
            report.cancelled = true;
            break;
        }
        let unit = Unit { total, completed };
        if !sync_project(&tx, fetcher, entry, settings, progress, unit, &mut report)? {
            report.cancelled = true;
            break;
        }
        report.projects += 1;
        completed += 1;
    }

    if !report.cancelled {
        progress.on_phase("Fetching translationAcademy");
        for manual in &settings.academy_manuals {
            if !progress.on_progress(manual, total, completed) {
                report.cancelled = true;
                break;
            }
            let url = settings.academy_url(manual);
            let volume: AcademyManual = fetch_json(fetcher, &url)?;
            index_manual(&tx, manual, &volume, &url, completed)?;
            report.manuals += 1;
            completed += 1;
        }
    }

    tx.commit()?;
    if report.cancelled {
        log::warn!(
            "Synchronization cancelled after {} of {} units",
            completed,
            total
        );
    } else {
        progress.on_progress("done", total, total);
    }
    log::info!(
        "Indexed {} projects, {} languages, {} resources, {} manuals",
        report.projects,
        report.languages,
        report.resources,
        report.manuals
    );
    Ok(report)
}

/// Position of the current project among every unit of the run.
#[derive(Debug, Clone, Copy)]
struct Unit {
    total: usize,
    completed: usize,
}

/// Index one project in every language it is offered in. Returns false if
/// the progress callback asked to stop between languages.
fn sync_project(
    conn: &Connection,
    fetcher: &dyn Fetch,
    entry: &PrimaryCatalogEntry,
    settings: &SyncSettings,
    progress: &dyn SyncProgress,
    unit: Unit,
    report: &mut SyncReport,
) -> Result<bool, SyncError> {
    let languages: Vec<LanguageCatalogEntry> = fetch_json(fetcher, &entry.lang_catalog)?;
    log::debug!("{}: {} languages", entry.slug, languages.len());

    let is_bible_book = entry
        .meta
        .iter()
        .any(|slug| BIBLE_CATEGORIES.contains(&slug.as_str()));
    let chunks_url = if is_bible_book {
        settings.chunks_url(&entry.slug)
    } else {
        String::new()
    };

    for language in &languages {
        let tag = format!("{}/{}", entry.slug, language.language.slug);
        if !progress.on_progress(&tag, unit.total, unit.completed) {
            return Ok(false);
        }
        let language_id = add_source_language(
            conn,
            &SourceLanguage {
                slug: language.language.slug.clone(),
                name: language.language.name.clone(),
                direction: language.language.direction.clone(),
            },
        )?;
        report.languages += 1;

        let project = Project {
            slug: entry.slug.clone(),
            name: language.project.name.clone(),
            description: language.project.desc.clone(),
            icon: String::new(),
            sort: clamp_i32(entry.sort),
            chunks_url: chunks_url.clone(),
            source_language_slug: String::new(),
        };
        let categories = category_chain(entry, language);
        let project_id = add_project(conn, &project, &categories, language_id)?;

        let resources: Vec<ResourceCatalogEntry> = fetch_json(fetcher, &language.res_catalog)?;
        for raw in &resources {
            report.resources += index_legacy_resource(conn, raw, &entry.slug, project_id, language_id)?;
        }
    }
    Ok(true)
}

/// Pair the primary catalog's category slugs with localized names.
fn category_chain(entry: &PrimaryCatalogEntry, language: &LanguageCatalogEntry) -> Vec<Category> {
    entry
        .meta
        .iter()
        .enumerate()
        .map(|(i, slug)| Category {
            slug: slug.clone(),
            name: language
                .project
                .meta
                .get(i)
                .filter(|name| !name.is_empty())
                .cloned()
                .unwrap_or_else(|| slug.clone()),
        })
        .collect()
}

/// Index one raw legacy resource and the help resources it carries inline.
/// Returns how many resources were written.
fn index_legacy_resource(
    conn: &Connection,
    raw: &ResourceCatalogEntry,
    project_slug: &str,
    project_id: i64,
    language_id: i64,
) -> Result<usize, SyncError> {
    let mut book = legacy_resource(
        &raw.slug,
        &raw.name,
        ResourceType::Book,
        &raw.status,
        &raw.source,
        raw.date_modified,
    );
    book.words_assignments_url = raw.tw_cat.clone().filter(|url| !url.is_empty());
    add_resource(conn, &book, project_id)?;
    let mut written = 1;

    if let Some(url) = non_empty(&raw.notes) {
        let notes = legacy_resource(
            "tn",
            "translationNotes",
            ResourceType::Help,
            &raw.status,
            url,
            raw.date_modified,
        );
        add_resource(conn, &notes, project_id)?;
        written += 1;
    }

    if let Some(url) = non_empty(&raw.checking_questions) {
        let questions = legacy_resource(
            "tq",
            "translationQuestions",
            ResourceType::Help,
            &raw.status,
            url,
            raw.date_modified,
        );
        add_resource(conn, &questions, project_id)?;
        written += 1;
    }

    if let Some(url) = non_empty(&raw.terms) {
        // Words are shared by every book, so they live in one project.
        let (slug, name) = if project_slug == "obs" {
            ("bible-obs", "translationWords OBS")
        } else {
            ("bible", "translationWords")
        };
        let shared = Project {
            slug: slug.to_string(),
            name: name.to_string(),
            ..Project::default()
        };
        let shared_id = add_project(conn, &shared, &[], language_id)?;
        let words = legacy_resource(
            "tw",
            "translationWords",
            ResourceType::Dict,
            &raw.status,
            url,
            raw.date_modified,
        );
        add_resource(conn, &words, shared_id)?;
        written += 1;
    }

    Ok(written)
}

/// Feed integers are parsed leniently as `i64`; saturate instead of wrapping.
pub(crate) fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn non_empty(url: &Option<String>) -> Option<&str> {
    url.as_deref().filter(|u| !u.is_empty())
}

fn legacy_resource(
    slug: &str,
    name: &str,
    resource_type: ResourceType,
    status: &FeedStatus,
    url: &str,
    modified_at: i64,
) -> Resource {
    Resource {
        slug: slug.to_string(),
        name: name.to_string(),
        resource_type,
        translate_mode: TranslateMode::for_legacy_slug(slug),
        checking_level: clamp_i32(status.checking_level),
        comments: status.comments.clone(),
        pub_date: status.publish_date.clone(),
        license: status.license.clone(),
        version: status.version.clone(),
        formats: vec![ResourceFormat {
            package_version: PACKAGE_VERSION.to_string(),
            mime_type: resource_type.legacy_mime_type(),
            modified_at,
            url: url.to_string(),
            imported: false,
        }],
        words_assignments_url: None,
    }
}

fn index_manual(
    conn: &Connection,
    slug: &str,
    manual: &AcademyManual,
    url: &str,
    sort: usize,
) -> Result<(), SyncError> {
    let meta = &manual.meta;
    let language_id = add_source_language(
        conn,
        &SourceLanguage {
            slug: meta.language.lc.clone(),
            name: if meta.language.ln.is_empty() {
                meta.language.lc.clone()
            } else {
                meta.language.ln.clone()
            },
            direction: meta.language.ld.clone(),
        },
    )?;

    let title = if meta.manual_title.is_empty() {
        slug.to_string()
    } else {
        meta.manual_title.clone()
    };
    let project = Project {
        slug: slug.to_string(),
        name: title.clone(),
        sort: i32::try_from(sort).unwrap_or(i32::MAX),
        ..Project::default()
    };
    let category = Category {
        slug: ACADEMY_CATEGORY.to_string(),
        name: "translationAcademy".to_string(),
    };
    let project_id = add_project(conn, &project, &[category], language_id)?;

    let volume = if meta.volume.is_empty() {
        "1"
    } else {
        meta.volume.as_str()
    };
    let mut resource = legacy_resource(
        &format!("vol{volume}"),
        &title,
        ResourceType::Man,
        &meta.status,
        url,
        meta.modified_at,
    );
    resource.translate_mode = TranslateMode::Gl;
    add_resource(conn, &resource, project_id)?;
    log::debug!("Indexed manual {slug} vol{volume}");
    Ok(())
}
