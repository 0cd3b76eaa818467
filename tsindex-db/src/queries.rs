//! Read queries for the index database.
//!
//! Localized rows (projects, category names, versification names) are
//! resolved with a fixed preference: the requested language, then `en`,
//! then any language.

use rusqlite::types::Value;
use rusqlite::{Connection, params, params_from_iter};
use tsindex_types::*;

use crate::operations::OperationError;

/// Orders source languages by preference: requested (3), `en` (2), other (1).
const LANGUAGE_WEIGHT: &str = "CASE sl.slug WHEN ?1 THEN 3 WHEN 'en' THEN 2 ELSE 1 END";

/// A resource qualifies regardless of level or mode once it has an imported format.
const HAS_IMPORTED_FORMAT: &str =
    "EXISTS (SELECT 1 FROM resource_format f WHERE f.resource_id = r.id AND f.imported = 1)";

const PROJECT_COLUMNS: &str =
    "p.slug, p.name, p.description, p.icon, p.sort, p.chunks_url, sl.slug";

const RESOURCE_COLUMNS: &str = "r.id, r.slug, r.name, r.type, r.translate_mode, r.checking_level,
    r.comments, r.pub_date, r.license, r.version, li.translation_words_assignments_url";

const TRANSLATION_FROM: &str = "FROM resource r
    JOIN project p ON p.id = r.project_id
    JOIN source_language sl ON sl.id = p.source_language_id
    LEFT JOIN legacy_resource_info li ON li.resource_id = r.id";

// ── Source Languages ────────────────────────────────────────────────────────

pub fn get_source_language(
    conn: &Connection,
    slug: &str,
) -> Result<Option<SourceLanguage>, OperationError> {
    let result = conn.query_row(
        "SELECT slug, name, direction FROM source_language WHERE slug = ?1",
        [slug],
        row_to_source_language,
    );
    match result {
        Ok(language) => Ok(Some(language)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_source_languages(conn: &Connection) -> Result<Vec<SourceLanguage>, OperationError> {
    let mut stmt = conn.prepare("SELECT slug, name, direction FROM source_language ORDER BY slug")?;
    let rows = stmt.query_map([], row_to_source_language)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Projects ────────────────────────────────────────────────────────────────

/// Projects available in `language`.
///
/// With `enable_default_language`, every project slug known in any language
/// is returned once, in the best available language.
pub fn get_projects(
    conn: &Connection,
    language: &str,
    enable_default_language: bool,
) -> Result<Vec<Project>, OperationError> {
    let sql = if enable_default_language {
        format!(
            "SELECT slug, name, description, icon, sort, chunks_url, language FROM (
                 SELECT {PROJECT_COLUMNS} AS language,
                        ROW_NUMBER() OVER (
                            PARTITION BY p.slug ORDER BY {LANGUAGE_WEIGHT} DESC, sl.slug
                        ) AS preference
                 FROM project p JOIN source_language sl ON sl.id = p.source_language_id
             )
             WHERE preference = 1
             ORDER BY sort, slug"
        )
    } else {
        format!(
            "SELECT {PROJECT_COLUMNS}
             FROM project p JOIN source_language sl ON sl.id = p.source_language_id
             WHERE sl.slug = ?1
             ORDER BY p.sort, p.slug"
        )
    };
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([language], row_to_project)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn get_project(
    conn: &Connection,
    language: &str,
    slug: &str,
    enable_default_language: bool,
) -> Result<Option<Project>, OperationError> {
    let filter = if enable_default_language {
        ""
    } else {
        "AND sl.slug = ?1"
    };
    let result = conn.query_row(
        &format!(
            "SELECT {PROJECT_COLUMNS}
             FROM project p JOIN source_language sl ON sl.id = p.source_language_id
             WHERE p.slug = ?2 {filter}
             ORDER BY {LANGUAGE_WEIGHT} DESC, sl.slug
             LIMIT 1"
        ),
        params![language, slug],
        row_to_project,
    );
    match result {
        Ok(project) => Ok(Some(project)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Categories ──────────────────────────────────────────────────────────────

/// One level of the category/project tree below `parent_id`.
///
/// Categories come first (by slug), then projects (by sort, slug). With a
/// `translate_mode`, nodes whose subtree holds no qualifying resource are
/// left out.
pub fn get_project_categories(
    conn: &Connection,
    parent_id: i64,
    language: &str,
    translate_mode: Option<TranslateMode>,
) -> Result<Vec<ProjectCategory>, OperationError> {
    let mut nodes = Vec::new();

    let parent_slug = if parent_id == ROOT_CATEGORY_ID {
        String::new()
    } else {
        match conn.query_row("SELECT slug FROM category WHERE id = ?1", [parent_id], |row| {
            row.get::<_, String>(0)
        }) {
            Ok(slug) => slug,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(nodes),
            Err(e) => return Err(e.into()),
        }
    };

    let mut stmt = conn.prepare("SELECT id, slug FROM category WHERE parent_id = ?1 ORDER BY slug")?;
    let categories = stmt
        .query_map([parent_id], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    for (category_id, slug) in categories {
        if let Some(mode) = translate_mode {
            if !category_has_resources(conn, category_id, mode)? {
                continue;
            }
        }
        let (name, name_language) = localized_category_name(conn, category_id, language)?
            .unwrap_or_else(|| (slug.clone(), String::new()));
        nodes.push(ProjectCategory {
            category_id,
            category_slug: slug,
            project_slug: String::new(),
            source_language_slug: name_language,
            parent_id,
            name,
            icon: String::new(),
            sort: 0,
        });
    }

    let project_slugs: Vec<String> = if parent_id == ROOT_CATEGORY_ID {
        let mut stmt = conn.prepare(
            "SELECT DISTINCT p.slug FROM project p
             WHERE NOT EXISTS (
                 SELECT 1 FROM project_category pc
                 JOIN project other ON other.id = pc.project_id
                 WHERE other.slug = p.slug
             )",
        )?;
        let slugs: Vec<String> = stmt.query_map([], |row| row.get(0))?.collect::<Result<Vec<_>, _>>()?;
        slugs
    } else {
        let mut stmt = conn.prepare(
            "SELECT DISTINCT p.slug FROM project p
             JOIN project_category pc ON pc.project_id = p.id
             WHERE pc.category_id = ?1",
        )?;
        let slugs: Vec<String> = stmt
            .query_map([parent_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        slugs
    };

    let mut projects = Vec::new();
    for slug in project_slugs {
        if let Some(mode) = translate_mode {
            if !project_has_resources(conn, &slug, mode)? {
                continue;
            }
        }
        if let Some(project) = get_project(conn, language, &slug, true)? {
            projects.push(project);
        }
    }
    projects.sort_by(|a, b| a.sort.cmp(&b.sort).then_with(|| a.slug.cmp(&b.slug)));

    nodes.extend(projects.into_iter().map(|project| ProjectCategory {
        category_id: parent_id,
        category_slug: parent_slug.clone(),
        project_slug: project.slug,
        source_language_slug: project.source_language_slug,
        parent_id,
        name: project.name,
        icon: project.icon,
        sort: project.sort,
    }));

    Ok(nodes)
}

/// The category chain a project hangs from, outermost first, localized.
pub fn get_category_path(
    conn: &Connection,
    language: &str,
    project_slug: &str,
) -> Result<Vec<Category>, OperationError> {
    let leaf = conn.query_row(
        &format!(
            "SELECT pc.category_id
             FROM project_category pc
             JOIN project p ON p.id = pc.project_id
             JOIN source_language sl ON sl.id = p.source_language_id
             WHERE p.slug = ?2
             ORDER BY {LANGUAGE_WEIGHT} DESC, sl.slug
             LIMIT 1"
        ),
        params![language, project_slug],
        |row| row.get::<_, i64>(0),
    );
    let mut category_id = match leaf {
        Ok(id) => id,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut path = Vec::new();
    while category_id != ROOT_CATEGORY_ID {
        let (slug, parent_id): (String, i64) = conn.query_row(
            "SELECT slug, parent_id FROM category WHERE id = ?1",
            [category_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let name = localized_category_name(conn, category_id, language)?
            .map(|(name, _)| name)
            .unwrap_or_else(|| slug.clone());
        path.push(Category { slug, name });
        category_id = parent_id;
    }
    path.reverse();
    Ok(path)
}

fn localized_category_name(
    conn: &Connection,
    category_id: i64,
    language: &str,
) -> Result<Option<(String, String)>, OperationError> {
    let result = conn.query_row(
        &format!(
            "SELECT cn.name, sl.slug
             FROM category_name cn
             JOIN source_language sl ON sl.id = cn.source_language_id
             WHERE cn.category_id = ?2
             ORDER BY {LANGUAGE_WEIGHT} DESC, sl.slug
             LIMIT 1"
        ),
        params![language, category_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    );
    match result {
        Ok(name) => Ok(Some(name)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn category_has_resources(
    conn: &Connection,
    category_id: i64,
    mode: TranslateMode,
) -> Result<bool, OperationError> {
    Ok(conn.query_row(
        &format!(
            "WITH RECURSIVE subtree(id) AS (
                 SELECT ?1
                 UNION
                 SELECT c.id FROM category c JOIN subtree s ON c.parent_id = s.id
             )
             SELECT EXISTS (
                 SELECT 1 FROM project_category pc
                 JOIN resource r ON r.project_id = pc.project_id
                 WHERE pc.category_id IN (SELECT id FROM subtree)
                   AND (r.translate_mode = ?2 OR {HAS_IMPORTED_FORMAT})
             )"
        ),
        params![category_id, mode.as_str()],
        |row| row.get(0),
    )?)
}

fn project_has_resources(
    conn: &Connection,
    project_slug: &str,
    mode: TranslateMode,
) -> Result<bool, OperationError> {
    Ok(conn.query_row(
        &format!(
            "SELECT EXISTS (
                 SELECT 1 FROM resource r
                 JOIN project p ON p.id = r.project_id
                 WHERE p.slug = ?1
                   AND (r.translate_mode = ?2 OR {HAS_IMPORTED_FORMAT})
             )"
        ),
        params![project_slug, mode.as_str()],
        |row| row.get(0),
    )?)
}

// ── Translations ────────────────────────────────────────────────────────────

/// Filter for [`find_translations`]. `None` or blank fields match anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationFilter {
    pub language: Option<String>,
    pub project: Option<String>,
    pub resource: Option<String>,
    pub resource_type: Option<ResourceType>,
    pub translate_mode: Option<TranslateMode>,
    pub min_checking_level: Option<i32>,
    pub max_checking_level: Option<i32>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Translations matching `filter`.
///
/// Level and mode constraints only apply to catalog content: a resource
/// with an imported format always qualifies.
pub fn find_translations(
    conn: &Connection,
    filter: &TranslationFilter,
) -> Result<Vec<Translation>, OperationError> {
    let mut clauses = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    let mut exact = |column: &str, value: Option<&str>, clauses: &mut Vec<String>| {
        if let Some(value) = value {
            values.push(Value::Text(value.to_string()));
            clauses.push(format!("{column} = ?{}", values.len()));
        }
    };
    exact("sl.slug", non_blank(&filter.language), &mut clauses);
    exact("p.slug", non_blank(&filter.project), &mut clauses);
    exact("r.slug", non_blank(&filter.resource), &mut clauses);
    exact(
        "r.type",
        filter.resource_type.as_ref().map(ResourceType::as_str),
        &mut clauses,
    );

    let mut qualifying = Vec::new();
    if let Some(min) = filter.min_checking_level {
        values.push(Value::Integer(i64::from(min)));
        qualifying.push(format!("r.checking_level >= ?{}", values.len()));
    }
    if let Some(max) = filter.max_checking_level {
        values.push(Value::Integer(i64::from(max)));
        qualifying.push(format!("r.checking_level <= ?{}", values.len()));
    }
    if let Some(mode) = filter.translate_mode {
        values.push(Value::Text(mode.as_str().to_string()));
        qualifying.push(format!("r.translate_mode = ?{}", values.len()));
    }
    if !qualifying.is_empty() {
        clauses.push(format!(
            "(({}) OR {HAS_IMPORTED_FORMAT})",
            qualifying.join(" AND ")
        ));
    }

    query_translations(conn, &clauses, &values)
}

/// Translations with at least one manually imported format.
pub fn get_imported_translations(conn: &Connection) -> Result<Vec<Translation>, OperationError> {
    query_translations(conn, &[HAS_IMPORTED_FORMAT.to_string()], &[])
}

/// Look a translation up by its container slug.
pub fn get_translation(
    conn: &Connection,
    container_slug: &str,
) -> Result<Option<Translation>, OperationError> {
    let Some((language, project, resource)) = parse_container_slug(container_slug) else {
        return Ok(None);
    };
    let clauses = ["sl.slug = ?1".to_string(), "p.slug = ?2".to_string(), "r.slug = ?3".to_string()];
    let values = [
        Value::Text(language.to_string()),
        Value::Text(project.to_string()),
        Value::Text(resource.to_string()),
    ];
    Ok(query_translations(conn, &clauses, &values)?.into_iter().next())
}

fn query_translations(
    conn: &Connection,
    clauses: &[String],
    values: &[Value],
) -> Result<Vec<Translation>, OperationError> {
    let filter = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    let mut stmt = conn.prepare(&format!(
        "SELECT sl.slug, sl.name, sl.direction,
                p.slug, p.name, p.description, p.icon, p.sort, p.chunks_url,
                {RESOURCE_COLUMNS}
         {TRANSLATION_FROM}
         {filter}
         ORDER BY sl.slug, p.sort, p.slug, r.slug"
    ))?;
    let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
        let language = SourceLanguage {
            slug: row.get(0)?,
            name: row.get(1)?,
            direction: row.get(2)?,
        };
        let project = Project {
            slug: row.get(3)?,
            name: row.get(4)?,
            description: row.get(5)?,
            icon: row.get(6)?,
            sort: row.get(7)?,
            chunks_url: row.get(8)?,
            source_language_slug: language.slug.clone(),
        };
        let (resource_id, resource) = row_to_resource(row, 9)?;
        Ok((resource_id, language, project, resource))
    })?;
    let rows = rows.collect::<Result<Vec<_>, _>>()?;

    let mut translations = Vec::with_capacity(rows.len());
    for (resource_id, language, project, mut resource) in rows {
        resource.formats = formats_for_resource(conn, resource_id)?;
        translations.push(Translation {
            language,
            project,
            resource,
        });
    }
    Ok(translations)
}

// ── Resources ───────────────────────────────────────────────────────────────

pub fn get_resource(
    conn: &Connection,
    language: &str,
    project: &str,
    resource: &str,
) -> Result<Option<Resource>, OperationError> {
    let result = conn.query_row(
        &format!(
            "SELECT {RESOURCE_COLUMNS} {TRANSLATION_FROM}
             WHERE sl.slug = ?1 AND p.slug = ?2 AND r.slug = ?3"
        ),
        params![language, project, resource],
        |row| row_to_resource(row, 0),
    );
    match result {
        Ok((resource_id, mut resource)) => {
            resource.formats = formats_for_resource(conn, resource_id)?;
            Ok(Some(resource))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_resources(
    conn: &Connection,
    language: &str,
    project: &str,
) -> Result<Vec<Resource>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RESOURCE_COLUMNS} {TRANSLATION_FROM}
         WHERE sl.slug = ?1 AND p.slug = ?2
         ORDER BY r.slug"
    ))?;
    let rows = stmt
        .query_map(params![language, project], |row| row_to_resource(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut resources = Vec::with_capacity(rows.len());
    for (resource_id, mut resource) in rows {
        resource.formats = formats_for_resource(conn, resource_id)?;
        resources.push(resource);
    }
    Ok(resources)
}

pub fn get_resource_formats(
    conn: &Connection,
    language: &str,
    project: &str,
    resource: &str,
) -> Result<Vec<ResourceFormat>, OperationError> {
    Ok(get_resource(conn, language, project, resource)?
        .map(|r| r.formats)
        .unwrap_or_default())
}

/// Distinct resource types present in the index.
pub fn get_resource_types(conn: &Connection) -> Result<Vec<ResourceType>, OperationError> {
    let mut stmt = conn.prepare("SELECT DISTINCT type FROM resource ORDER BY type")?;
    let rows = stmt.query_map([], |row| {
        let s: String = row.get(0)?;
        Ok(ResourceType::from_str_loose(&s))
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn formats_for_resource(
    conn: &Connection,
    resource_id: i64,
) -> Result<Vec<ResourceFormat>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT package_version, mime_type, modified_at, url, imported
         FROM resource_format WHERE resource_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map([resource_id], |row| {
        Ok(ResourceFormat {
            package_version: row.get(0)?,
            mime_type: row.get(1)?,
            modified_at: row.get(2)?,
            url: row.get(3)?,
            imported: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Catalogs ────────────────────────────────────────────────────────────────

pub fn get_catalog(conn: &Connection, slug: &str) -> Result<Option<Catalog>, OperationError> {
    let result = conn.query_row(
        "SELECT slug, url, modified_at FROM catalog WHERE slug = ?1",
        [slug],
        row_to_catalog,
    );
    match result {
        Ok(catalog) => Ok(Some(catalog)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_catalogs(conn: &Connection) -> Result<Vec<Catalog>, OperationError> {
    let mut stmt = conn.prepare("SELECT slug, url, modified_at FROM catalog ORDER BY id")?;
    let rows = stmt.query_map([], row_to_catalog)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Versifications & Chunks ─────────────────────────────────────────────────

/// Versifications named in the best available language.
pub fn get_versifications(
    conn: &Connection,
    language: &str,
) -> Result<Vec<Versification>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT v.slug, COALESCE(
             (SELECT vn.name FROM versification_name vn
              JOIN source_language sl ON sl.id = vn.source_language_id
              WHERE vn.versification_id = v.id
              ORDER BY {LANGUAGE_WEIGHT} DESC, sl.slug
              LIMIT 1),
             v.slug)
         FROM versification v
         ORDER BY v.slug"
    ))?;
    let rows = stmt.query_map([language], |row| {
        Ok(Versification {
            slug: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Chunk boundaries of a project in reading order.
pub fn get_chunk_markers(
    conn: &Connection,
    project_slug: &str,
    versification_slug: &str,
) -> Result<Vec<ChunkMarker>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT cm.chapter, cm.verse
         FROM chunk_marker cm
         JOIN versification v ON v.id = cm.versification_id
         WHERE cm.project_slug = ?1 AND v.slug = ?2
         ORDER BY CAST(cm.chapter AS INTEGER), cm.chapter,
                  CAST(cm.verse AS INTEGER), cm.verse",
    )?;
    let rows = stmt.query_map(params![project_slug, versification_slug], |row| {
        Ok(ChunkMarker {
            chapter: row.get(0)?,
            verse: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Questionnaires ──────────────────────────────────────────────────────────

pub fn get_questionnaires(conn: &Connection) -> Result<Vec<Questionnaire>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, td_id, language_slug, language_name, language_direction
         FROM questionnaire ORDER BY language_slug, td_id",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                Questionnaire {
                    td_id: row.get(1)?,
                    language_slug: row.get(2)?,
                    language_name: row.get(3)?,
                    language_direction: row.get(4)?,
                    data_fields: Default::default(),
                },
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut fields = conn.prepare(
        "SELECT field, question_td_id FROM questionnaire_data_field WHERE questionnaire_id = ?1",
    )?;
    let mut questionnaires = Vec::with_capacity(rows.len());
    for (id, mut questionnaire) in rows {
        questionnaire.data_fields = fields
            .query_map([id], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<Result<_, _>>()?;
        questionnaires.push(questionnaire);
    }
    Ok(questionnaires)
}

/// Questions of the questionnaire with server id `questionnaire_td_id`.
pub fn get_questions(
    conn: &Connection,
    questionnaire_td_id: i64,
) -> Result<Vec<Question>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT q.td_id, q.text, q.help, q.is_required, q.input_type, q.sort, q.depends_on
         FROM question q
         JOIN questionnaire qn ON qn.id = q.questionnaire_id
         WHERE qn.td_id = ?1
         ORDER BY q.sort, q.td_id",
    )?;
    let rows = stmt.query_map([questionnaire_td_id], |row| {
        Ok(Question {
            td_id: row.get(0)?,
            text: row.get(1)?,
            help: row.get(2)?,
            is_required: row.get(3)?,
            input_type: row.get(4)?,
            sort: row.get(5)?,
            depends_on: row.get(6)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Stats ───────────────────────────────────────────────────────────────────

/// Row counts across the index.
pub fn stats(conn: &Connection) -> Result<IndexStats, OperationError> {
    let count = |sql: &str| -> Result<i64, rusqlite::Error> { conn.query_row(sql, [], |row| row.get(0)) };

    Ok(IndexStats {
        source_languages: count("SELECT COUNT(*) FROM source_language")?,
        projects: count("SELECT COUNT(DISTINCT slug) FROM project")?,
        categories: count("SELECT COUNT(*) FROM category")?,
        resources: count("SELECT COUNT(*) FROM resource")?,
        imported_resources: count(
            "SELECT COUNT(DISTINCT resource_id) FROM resource_format WHERE imported = 1",
        )?,
        target_languages: count("SELECT COUNT(*) FROM target_language")?,
        temp_target_languages: count("SELECT COUNT(*) FROM temp_target_language")?,
        approved_temp_target_languages: count(
            "SELECT COUNT(*) FROM temp_target_language WHERE approved_target_language_slug IS NOT NULL",
        )?,
        catalogs: count("SELECT COUNT(*) FROM catalog")?,
        chunk_markers: count("SELECT COUNT(*) FROM chunk_marker")?,
        questionnaires: count("SELECT COUNT(*) FROM questionnaire")?,
    })
}

#[derive(Debug, Default)]
pub struct IndexStats {
    pub source_languages: i64,
    pub projects: i64,
    pub categories: i64,
    pub resources: i64,
    pub imported_resources: i64,
    pub target_languages: i64,
    pub temp_target_languages: i64,
    pub approved_temp_target_languages: i64,
    pub catalogs: i64,
    pub chunk_markers: i64,
    pub questionnaires: i64,
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_source_language(row: &rusqlite::Row<'_>) -> rusqlite::Result<SourceLanguage> {
    Ok(SourceLanguage {
        slug: row.get(0)?,
        name: row.get(1)?,
        direction: row.get(2)?,
    })
}

fn row_to_project(row: &rusqlite::Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        slug: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        icon: row.get(3)?,
        sort: row.get(4)?,
        chunks_url: row.get(5)?,
        source_language_slug: row.get(6)?,
    })
}

/// Map `RESOURCE_COLUMNS` starting at column `at`; formats are left empty.
fn row_to_resource(row: &rusqlite::Row<'_>, at: usize) -> rusqlite::Result<(i64, Resource)> {
    let resource_type: String = row.get(at + 3)?;
    let translate_mode: String = row.get(at + 4)?;
    Ok((
        row.get(at)?,
        Resource {
            slug: row.get(at + 1)?,
            name: row.get(at + 2)?,
            resource_type: ResourceType::from_str_loose(&resource_type),
            translate_mode: TranslateMode::from_str_loose(&translate_mode),
            checking_level: row.get(at + 5)?,
            comments: row.get(at + 6)?,
            pub_date: row.get(at + 7)?,
            license: row.get(at + 8)?,
            version: row.get(at + 9)?,
            formats: Vec::new(),
            words_assignments_url: row.get(at + 10)?,
        },
    ))
}

fn row_to_catalog(row: &rusqlite::Row<'_>) -> rusqlite::Result<Catalog> {
    Ok(Catalog {
        slug: row.get(0)?,
        url: row.get(1)?,
        modified_at: row.get(2)?,
    })
}
