//! Chunk boundaries for Bible books.

use tsindex_db::{
    Index, add_chunk_marker, add_source_language, add_versification, clear_chunk_markers,
    get_projects, get_source_language,
};
use tsindex_types::feeds::ChunkEntry;
use tsindex_types::{ChunkMarker, SourceLanguage, Versification, normalize_slug};

use crate::client::{Fetch, fetch_json};
use crate::error::SyncError;
use crate::progress::SyncProgress;

/// Versification every chunk feed is expressed in.
pub const DEFAULT_VERSIFICATION: &str = "en-US";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChunkReport {
    pub projects: usize,
    pub markers: usize,
    /// Projects whose feed could not be fetched or parsed.
    pub failed: Vec<String>,
    pub cancelled: bool,
}

/// Refresh chunk markers for every project with a chunks feed.
///
/// A project whose feed fails keeps its previous markers.
pub fn update_chunks(
    index: &Index,
    fetcher: &dyn Fetch,
    progress: &dyn SyncProgress,
) -> Result<ChunkReport, SyncError> {
    let tx = index.transaction()?;
    let mut report = ChunkReport::default();

    let english = get_source_language(&tx, "en")?.unwrap_or_else(|| SourceLanguage {
        slug: "en".to_string(),
        name: "English".to_string(),
        direction: "ltr".to_string(),
    });
    let english_id = add_source_language(&tx, &english)?;
    let versification_id = add_versification(
        &tx,
        &Versification {
            slug: DEFAULT_VERSIFICATION.to_string(),
            name: "American English".to_string(),
        },
        english_id,
    )?;

    let projects: Vec<_> = get_projects(&tx, "en", true)?
        .into_iter()
        .filter(|p| !p.chunks_url.is_empty())
        .collect();
    let total = projects.len();

    for (completed, project) in projects.iter().enumerate() {
        if !progress.on_progress(&project.slug, total, completed) {
            report.cancelled = true;
            break;
        }
        let entries: Vec<ChunkEntry> = match fetch_json(fetcher, &project.chunks_url) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Skipping chunks for {}: {}", project.slug, e);
                report.failed.push(project.slug.clone());
                continue;
            }
        };

        clear_chunk_markers(&tx, &project.slug)?;
        for entry in &entries {
            let marker = ChunkMarker {
                chapter: normalize_slug(&entry.chp),
                verse: normalize_slug(&entry.firstvs),
            };
            add_chunk_marker(&tx, &marker, &project.slug, versification_id)?;
            report.markers += 1;
        }
        report.projects += 1;
    }

    tx.commit()?;
    log::info!(
        "Indexed {} chunk markers across {} projects",
        report.markers,
        report.projects
    );
    Ok(report)
}
