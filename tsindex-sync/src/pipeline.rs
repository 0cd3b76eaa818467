//! Download and import of resource containers.

use std::fs;
use std::io::Write;
use std::path::Path;

use tsindex_container::{
    ContainerLibrary, ContainerProperties, LegacySource, ResourceContainer, convert_legacy_resource,
};
use tsindex_db::{Index, add_project, add_resource, add_source_language, get_category_path};
use tsindex_types::feeds::WordAssignments;
use tsindex_types::{CONTAINER_MIME_PREFIX, container_slug, is_container_mime_type};

use crate::client::{Fetch, fetch_json};
use crate::error::SyncError;

/// Download a resource and install it in the library as an open container.
///
/// Canonical containers are installed as they are; legacy payloads are
/// converted first. Any previous copy is replaced.
pub fn download(
    index: &Index,
    library: &ContainerLibrary,
    fetcher: &dyn Fetch,
    language: &str,
    project: &str,
    resource: &str,
) -> Result<ResourceContainer, SyncError> {
    let slug = container_slug(language, project, resource);
    let translation = index
        .get_translation(&slug)?
        .ok_or_else(|| SyncError::UnknownResource(slug.clone()))?;
    let format = translation
        .resource
        .formats
        .iter()
        .find(|f| is_container_mime_type(&f.mime_type))
        .ok_or_else(|| SyncError::MissingContainerFormat(slug.clone()))?;

    fs::create_dir_all(library.root())?;
    log::info!("Downloading {slug}");
    let body = fetcher.fetch(&format.url)?;
    let mut payload = tempfile::NamedTempFile::new_in(library.root())?;
    payload.write_all(&body)?;
    payload.flush()?;

    if format.mime_type.starts_with(CONTAINER_MIME_PREFIX) {
        library.delete(&slug)?;
        payload
            .persist(library.closed_path(&slug))
            .map_err(|e| SyncError::Io(e.error))?;
        return Ok(library.open(&slug)?);
    }

    let assignments = translation
        .resource
        .words_assignments_url
        .as_deref()
        .and_then(|url| fetch_assignments(fetcher, url));
    let categories = get_category_path(index.connection(), language, project)?;
    let source = LegacySource {
        language: &translation.language,
        project: &translation.project,
        categories: &categories,
        resource: &translation.resource,
    };

    let staging = tempfile::tempdir_in(library.root())?;
    let staged = staging.path().join(&slug);
    convert_legacy_resource(&fs::read(payload.path())?, source, assignments.as_ref(), &staged)?;
    let container = library.install(&staged)?;
    log::info!("Installed {} at {}", slug, container.path.display());
    Ok(container)
}

/// The word-assignment side-channel is optional; failures only warn.
fn fetch_assignments(fetcher: &dyn Fetch, url: &str) -> Option<WordAssignments> {
    match fetch_json(fetcher, url) {
        Ok(assignments) => Some(assignments),
        Err(e) => {
            log::warn!("Ignoring word assignments at {url}: {e}");
            None
        }
    }
}

/// Copy an external container into the library and index it as imported.
///
/// Only containers for projects the index already knows (in any language)
/// are accepted.
pub fn import_resource_container(
    index: &Index,
    library: &ContainerLibrary,
    dir: &Path,
) -> Result<ResourceContainer, SyncError> {
    let properties = ContainerProperties::read(dir)?;
    let language_slug = &properties.language.slug;
    let project_slug = &properties.project.slug;
    if index.get_project(language_slug, project_slug, true)?.is_none() {
        return Err(SyncError::UnknownProject {
            project: project_slug.clone(),
        });
    }

    let container = library.import_dir(dir)?;
    let url = container.path.display().to_string();
    let (language, project, resource) = properties.to_index_entities(&url);

    let tx = index.transaction()?;
    let language_id = add_source_language(&tx, &language)?;
    let categories = get_category_path(&tx, language_slug, project_slug)?;
    let project_id = add_project(&tx, &project, &categories, language_id)?;
    add_resource(&tx, &resource, project_id)?;
    tx.commit()?;

    log::info!("Imported {}", container.slug());
    Ok(container)
}
