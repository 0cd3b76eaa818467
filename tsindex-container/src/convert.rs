//! Conversion of legacy catalog payloads into resource containers.
//!
//! Layout: `content/<chapter>/<chunk>.<ext>`, with `title` and `reference`
//! chunks for chapter metadata. Book text is USX, everything else markdown.
//! Dictionary entries and academy articles use their id as the chapter and
//! a single `01` chunk.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tsindex_types::feeds::{
    AcademyManual, LegacyBook, LegacyNoteChunk, LegacyQuestionChapter, LegacyWord, WordAssignments,
};
use tsindex_types::{Category, Project, Resource, ResourceType, SourceLanguage, normalize_slug};

use crate::error::ContainerError;
use crate::library::{CONTENT_DIR, ResourceContainer};
use crate::properties::{
    ContainerProperties, LanguageInfo, PACKAGE_VERSION, ProjectInfo, ResourceInfo, ResourceStatus,
    WordAssignmentMap, check_path_component,
};

pub const USX_MIME_TYPE: &str = "text/usx";
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";

/// Indexed rows describing the resource being converted.
#[derive(Debug, Clone, Copy)]
pub struct LegacySource<'a> {
    pub language: &'a SourceLanguage,
    pub project: &'a Project,
    pub categories: &'a [Category],
    pub resource: &'a Resource,
}

/// Chunk files to write, keyed by chapter then chunk.
type Content = BTreeMap<String, BTreeMap<String, String>>;

/// Convert a downloaded legacy payload into an open container in `dest`.
///
/// `dest` must not exist yet or be empty. `assignments` is the optional
/// translationWords side-channel; its ids are normalized before being
/// turned into `//bible/tw/<id>` links.
pub fn convert_legacy_resource(
    payload: &[u8],
    source: LegacySource<'_>,
    assignments: Option<&WordAssignments>,
    dest: &Path,
) -> Result<ResourceContainer, ContainerError> {
    let resource = source.resource;
    let (content, mime_type, payload_modified_at) = match resource.resource_type {
        ResourceType::Book => {
            let book: LegacyBook = parse(payload, "book")?;
            let mime = if source.project.slug == "obs" {
                MARKDOWN_MIME_TYPE
            } else {
                USX_MIME_TYPE
            };
            (book_content(&book), mime, book.date_modified)
        }
        ResourceType::Help if resource.slug == "tq" => {
            let chapters: Vec<LegacyQuestionChapter> = parse(payload, "questions")?;
            (question_content(&chapters), MARKDOWN_MIME_TYPE, 0)
        }
        ResourceType::Help => {
            let chunks: Vec<LegacyNoteChunk> = parse(payload, "notes")?;
            (note_content(&chunks), MARKDOWN_MIME_TYPE, 0)
        }
        ResourceType::Dict => {
            let words: Vec<LegacyWord> = parse(payload, "words")?;
            (word_content(&words), MARKDOWN_MIME_TYPE, 0)
        }
        ResourceType::Man => {
            let manual: AcademyManual = parse(payload, "manual")?;
            let modified_at = manual.meta.modified_at;
            (academy_content(&manual), MARKDOWN_MIME_TYPE, modified_at)
        }
        ResourceType::Bundle => {
            return Err(ContainerError::conversion(format!(
                "bundle resource '{}' has no legacy form",
                resource.slug
            )));
        }
    };

    let format_modified_at = resource
        .formats
        .iter()
        .map(|f| f.modified_at)
        .max()
        .unwrap_or(0);

    let properties = ContainerProperties {
        package_version: PACKAGE_VERSION.to_string(),
        modified_at: payload_modified_at.max(format_modified_at),
        content_mime_type: mime_type.to_string(),
        language: LanguageInfo {
            slug: source.language.slug.clone(),
            name: source.language.name.clone(),
            direction: source.language.direction.clone(),
        },
        project: ProjectInfo {
            slug: source.project.slug.clone(),
            name: source.project.name.clone(),
            description: source.project.description.clone(),
            icon: source.project.icon.clone(),
            sort: source.project.sort,
            chunks_url: source.project.chunks_url.clone(),
            categories: source.categories.iter().map(|c| c.slug.clone()).collect(),
        },
        resource: ResourceInfo {
            slug: resource.slug.clone(),
            name: resource.name.clone(),
            resource_type: resource.resource_type,
            translate_mode: resource.translate_mode,
            status: ResourceStatus {
                checking_level: resource.checking_level,
                comments: resource.comments.clone(),
                pub_date: resource.pub_date.clone(),
                license: resource.license.clone(),
                version: resource.version.clone(),
            },
        },
        tw_assignments: assignments.map(word_links).unwrap_or_default(),
    };

    let extension = if mime_type == USX_MIME_TYPE { "usx" } else { "md" };
    write_container(dest, &properties, &content, extension)?;
    ResourceContainer::load(dest)
}

fn parse<T: serde::de::DeserializeOwned>(payload: &[u8], what: &str) -> Result<T, ContainerError> {
    serde_json::from_slice(payload)
        .map_err(|e| ContainerError::conversion(format!("malformed {what} payload: {e}")))
}

fn write_container(
    dest: &Path,
    properties: &ContainerProperties,
    content: &Content,
    extension: &str,
) -> Result<(), ContainerError> {
    // Chapter and chunk ids come from the payload and become file names.
    for (chapter, chunks) in content {
        check_path_component("chapter", chapter)?;
        for chunk in chunks.keys() {
            check_path_component("chunk", chunk)?;
        }
    }
    fs::create_dir_all(dest)?;
    properties.write(dest)?;
    let content_dir = dest.join(CONTENT_DIR);
    for (chapter, chunks) in content {
        let chapter_dir = content_dir.join(chapter);
        fs::create_dir_all(&chapter_dir)?;
        for (chunk, text) in chunks {
            fs::write(chapter_dir.join(format!("{chunk}.{extension}")), text)?;
        }
    }
    Ok(())
}

/// Split a legacy `"<chapter>-<chunk>"` id into normalized slugs.
fn split_chunk_id(id: &str) -> (String, String) {
    match id.split_once('-') {
        Some((chapter, chunk)) => (normalize_slug(chapter), normalize_slug(chunk)),
        None => (normalize_slug(id), "01".to_string()),
    }
}

fn book_content(book: &LegacyBook) -> Content {
    let mut content = Content::new();
    for chapter in &book.chapters {
        let chapter_slug = normalize_slug(&chapter.number);
        let chunks = content.entry(chapter_slug).or_default();
        if !chapter.title.is_empty() {
            chunks.insert("title".to_string(), chapter.title.clone());
        }
        if !chapter.reference.is_empty() {
            chunks.insert("reference".to_string(), chapter.reference.clone());
        }
        for frame in &chapter.frames {
            let (_, chunk) = split_chunk_id(&frame.id);
            let text = if frame.img.is_empty() {
                frame.text.clone()
            } else {
                format!("![]({})\n\n{}", frame.img, frame.text)
            };
            chunks.insert(chunk, text);
        }
    }
    content
}

fn note_content(chunks: &[LegacyNoteChunk]) -> Content {
    let mut content = Content::new();
    for chunk in chunks {
        let (chapter, chunk_slug) = split_chunk_id(&chunk.id);
        let text = chunk
            .tn
            .iter()
            .map(|note| format!("# {}\n\n{}\n", note.reference.trim(), note.text.trim()))
            .collect::<Vec<_>>()
            .join("\n");
        content.entry(chapter).or_default().insert(chunk_slug, text);
    }
    content
}

/// Questions are filed under every chunk they reference.
fn question_content(chapters: &[LegacyQuestionChapter]) -> Content {
    let mut content = Content::new();
    for chapter in chapters {
        let chapter_slug = normalize_slug(&chapter.id);
        for question in &chapter.cq {
            let entry = format!("# {}\n\n{}\n", question.q.trim(), question.a.trim());
            for reference in &question.references {
                let (chapter, chunk) = match reference.split_once('-') {
                    Some(_) => split_chunk_id(reference),
                    None => (chapter_slug.clone(), normalize_slug(reference)),
                };
                let text = content.entry(chapter).or_default().entry(chunk).or_default();
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&entry);
            }
        }
    }
    content
}

fn word_content(words: &[LegacyWord]) -> Content {
    let mut content = Content::new();
    for word in words {
        let mut text = format!("# {}\n\n", word.term.trim());
        if !word.def_title.is_empty() {
            text.push_str(&format!("## {}\n\n", word.def_title.trim()));
        }
        text.push_str(word.def.trim());
        text.push('\n');
        if !word.cf.is_empty() {
            let links: Vec<String> = word.cf.iter().map(|id| format!("[[//bible/tw/{id}]]")).collect();
            text.push_str(&format!("\nSee also: {}\n", links.join(", ")));
        }
        content
            .entry(word.id.clone())
            .or_default()
            .insert("01".to_string(), text);
    }
    content
}

fn academy_content(manual: &AcademyManual) -> Content {
    let mut content = Content::new();
    for article in &manual.articles {
        let mut text = format!("# {}\n\n", article.title.trim());
        if !article.question.is_empty() {
            text.push_str(&format!("> {}\n\n", article.question.trim()));
        }
        text.push_str(article.text.trim());
        text.push('\n');
        let chunks = content.entry(article.id.clone()).or_default();
        chunks.insert("01".to_string(), text);
        if !article.reference.is_empty() {
            chunks.insert("reference".to_string(), article.reference.clone());
        }
    }
    content
}

/// Turn the side-channel into per-chunk `//bible/tw/<id>` links.
pub fn word_links(assignments: &WordAssignments) -> WordAssignmentMap {
    let mut map = WordAssignmentMap::new();
    for chapter in &assignments.chapters {
        let chapter_slug = normalize_slug(&chapter.id);
        for frame in &chapter.frames {
            if frame.items.is_empty() {
                continue;
            }
            let links = map
                .entry(chapter_slug.clone())
                .or_default()
                .entry(normalize_slug(&frame.id))
                .or_default();
            for item in &frame.items {
                let link = format!("//bible/tw/{}", item.id);
                if !links.contains(&link) {
                    links.push(link);
                }
            }
        }
    }
    map
}
