//! Target-language identity: the canonical registry, provisional (temp)
//! codes, and the approvals mapping a temp code onto a canonical one.
//!
//! Readers see a single merged view: every canonical language plus every
//! temp language that has neither been approved nor shadowed by a canonical
//! language with the same slug.

use rusqlite::Connection;
use tsindex_types::{TargetLanguage, TempTargetLanguage};

use crate::operations::OperationError;
use crate::upsert::{Record, upsert};

const COLUMNS: &str = "slug, name, anglicized_name, direction, region, is_gateway_language";

const MERGED_VIEW: &str = "
    SELECT slug, name, anglicized_name, direction, region, is_gateway_language
    FROM target_language
    UNION ALL
    SELECT t.slug, t.name, t.anglicized_name, t.direction, t.region, t.is_gateway_language
    FROM temp_target_language t
    WHERE t.approved_target_language_slug IS NULL
      AND NOT EXISTS (SELECT 1 FROM target_language c WHERE c.slug = t.slug)";

// ── Writes ──────────────────────────────────────────────────────────────────

fn language_record(table: &'static str, language: &TargetLanguage) -> Record {
    Record::new(table)
        .text("slug", &language.slug)
        .text("name", &language.name)
        .text("anglicized_name", &language.anglicized_name)
        .text("direction", &language.direction)
        .text("region", &language.region)
        .set("is_gateway_language", language.is_gateway_language)
}

pub fn add_target_language(
    conn: &Connection,
    language: &TargetLanguage,
) -> Result<i64, OperationError> {
    upsert(conn, &language_record("target_language", language), &["slug"])
}

/// Index a temp language. An approval, if given, must name a known
/// canonical language; without one any existing approval is kept.
pub fn add_temp_target_language(
    conn: &Connection,
    language: &TempTargetLanguage,
) -> Result<i64, OperationError> {
    let mut record = language_record("temp_target_language", &language.language);
    if let Some(approved) = &language.approved_target_language_slug {
        if !target_language_exists(conn, approved)? {
            return Err(OperationError::UnknownTargetLanguage(approved.clone()));
        }
        record = record.text("approved_target_language_slug", approved);
    }
    upsert(conn, &record, &["slug"])
}

/// Map the temp code `temp_slug` onto the canonical `target_slug`.
///
/// Returns false, leaving the index untouched, when either side is unknown.
pub fn set_approved_target_language(
    conn: &Connection,
    temp_slug: &str,
    target_slug: &str,
) -> Result<bool, OperationError> {
    if !target_language_exists(conn, target_slug)? {
        return Ok(false);
    }
    let Some(temp) = get_temp_target_language(conn, temp_slug)? else {
        return Ok(false);
    };

    let record = language_record("temp_target_language", &temp.language)
        .text("approved_target_language_slug", target_slug);
    upsert(conn, &record, &["slug"])?;
    Ok(true)
}

pub fn clear_target_languages(conn: &Connection) -> Result<usize, OperationError> {
    Ok(conn.execute("DELETE FROM target_language", [])?)
}

pub fn clear_temp_target_languages(conn: &Connection) -> Result<usize, OperationError> {
    Ok(conn.execute("DELETE FROM temp_target_language", [])?)
}

/// Drop every approval, keeping the temp languages themselves.
pub fn clear_approved_target_languages(conn: &Connection) -> Result<usize, OperationError> {
    Ok(conn.execute(
        "UPDATE temp_target_language SET approved_target_language_slug = NULL
         WHERE approved_target_language_slug IS NOT NULL",
        [],
    )?)
}

// ── Reads ───────────────────────────────────────────────────────────────────

fn target_language_exists(conn: &Connection, slug: &str) -> Result<bool, OperationError> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM target_language WHERE slug = ?1)",
        [slug],
        |row| row.get(0),
    )?)
}

/// Every selectable target language, ordered by slug.
pub fn get_target_languages(conn: &Connection) -> Result<Vec<TargetLanguage>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM ({MERGED_VIEW}) ORDER BY slug"
    ))?;
    let rows = stmt.query_map([], row_to_target_language)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Look a language up by slug: the canonical registry first, then temp codes.
pub fn get_target_language(
    conn: &Connection,
    slug: &str,
) -> Result<Option<TargetLanguage>, OperationError> {
    let canonical = conn.query_row(
        &format!("SELECT {COLUMNS} FROM target_language WHERE slug = ?1"),
        [slug],
        row_to_target_language,
    );
    match canonical {
        Ok(language) => return Ok(Some(language)),
        Err(rusqlite::Error::QueryReturnedNoRows) => {}
        Err(e) => return Err(e.into()),
    }
    Ok(get_temp_target_language(conn, slug)?.map(|t| t.language))
}

pub fn get_temp_target_language(
    conn: &Connection,
    slug: &str,
) -> Result<Option<TempTargetLanguage>, OperationError> {
    let result = conn.query_row(
        &format!(
            "SELECT {COLUMNS}, approved_target_language_slug FROM temp_target_language WHERE slug = ?1"
        ),
        [slug],
        |row| {
            Ok(TempTargetLanguage {
                language: row_to_target_language(row)?,
                approved_target_language_slug: row.get(6)?,
            })
        },
    );
    match result {
        Ok(language) => Ok(Some(language)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The canonical language a temp code has been approved as, if any.
pub fn get_approved_target_language(
    conn: &Connection,
    temp_slug: &str,
) -> Result<Option<TargetLanguage>, OperationError> {
    let result = conn.query_row(
        "SELECT c.slug, c.name, c.anglicized_name, c.direction, c.region, c.is_gateway_language
         FROM temp_target_language t
         JOIN target_language c ON c.slug = t.approved_target_language_slug
         WHERE t.slug = ?1",
        [temp_slug],
        row_to_target_language,
    );
    match result {
        Ok(language) => Ok(Some(language)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Case-insensitive search over slug, name and anglicized name.
///
/// Slug-prefix hits rank first, then name-prefix hits, then any other
/// substring hit; ties are ordered by slug. Matching happens here rather
/// than in SQL because SQLite's `LOWER()` only folds ASCII.
pub fn find_target_language(
    conn: &Connection,
    query: &str,
) -> Result<Vec<TargetLanguage>, OperationError> {
    let query = query.trim().to_lowercase();
    let languages = get_target_languages(conn)?;
    if query.is_empty() {
        return Ok(languages);
    }

    let mut ranked: Vec<(u8, TargetLanguage)> = languages
        .into_iter()
        .filter_map(|language| match_rank(&language, &query).map(|rank| (rank, language)))
        .collect();
    // Stable, so equal ranks keep the slug order of the merged view.
    ranked.sort_by_key(|(rank, _)| *rank);
    Ok(ranked.into_iter().map(|(_, language)| language).collect())
}

fn match_rank(language: &TargetLanguage, query: &str) -> Option<u8> {
    let slug = language.slug.to_lowercase();
    let name = language.name.to_lowercase();
    let anglicized = language.anglicized_name.to_lowercase();

    if slug.starts_with(query) {
        Some(0)
    } else if name.starts_with(query) || anglicized.starts_with(query) {
        Some(1)
    } else if slug.contains(query) || name.contains(query) || anglicized.contains(query) {
        Some(2)
    } else {
        None
    }
}

fn row_to_target_language(row: &rusqlite::Row<'_>) -> rusqlite::Result<TargetLanguage> {
    Ok(TargetLanguage {
        slug: row.get(0)?,
        name: row.get(1)?,
        anglicized_name: row.get(2)?,
        direction: row.get(3)?,
        region: row.get(4)?,
        is_gateway_language: row.get(5)?,
    })
}
