mod common;

use std::fs;
use std::path::Path;

use common::*;
use serde_json::json;
use tsindex_container::properties::{LanguageInfo, ProjectInfo, ResourceInfo, ResourceStatus};
use tsindex_container::{ContainerLibrary, ContainerProperties};
use tsindex_db::{Index, TranslationFilter, add_project, add_resource, add_source_language};
use tsindex_sync::*;
use tsindex_types::{
    Project, Resource, ResourceFormat, ResourceType, SourceLanguage, TranslateMode,
};

fn with_payloads(fetcher: MockFetcher) -> MockFetcher {
    fetcher
        .json(
            "mock://gen/en/ulb/source.json",
            json!({
                "date_modified": "20160201",
                "chapters": [{
                    "number": "1",
                    "title": "Chapter 1",
                    "frames": [
                        {"id": "01-01", "text": "<verse number=\"1\" /> In the beginning"},
                        {"id": "01-03", "text": "<verse number=\"3\" /> Let there be light"}
                    ]
                }]
            }),
        )
        .json(
            "mock://gen/en/tw_cat.json",
            json!({"chapters": [{"id": "1", "frames": [{"id": "1", "items": [{"id": "god"}, {"id": "god"}]}]}]}),
        )
}

fn synced() -> (Index, MockFetcher) {
    let fetcher = with_payloads(source_catalog());
    let index = Index::open_memory().unwrap();
    synchronize_sources(&index, &fetcher, PRIMARY_URL, &settings(), &SilentProgress).unwrap();
    (index, fetcher)
}

fn properties(language: &str, project: &str, resource: &str) -> ContainerProperties {
    ContainerProperties {
        package_version: "1".to_string(),
        modified_at: 1,
        content_mime_type: "text/usx".to_string(),
        language: LanguageInfo {
            slug: language.to_string(),
            name: "Deutsch".to_string(),
            direction: "ltr".to_string(),
        },
        project: ProjectInfo {
            slug: project.to_string(),
            name: "1. Mose".to_string(),
            description: String::new(),
            icon: String::new(),
            sort: 1,
            chunks_url: String::new(),
            categories: vec!["bible-ot".to_string()],
        },
        resource: ResourceInfo {
            slug: resource.to_string(),
            name: "Bibel".to_string(),
            resource_type: ResourceType::Book,
            translate_mode: TranslateMode::All,
            status: ResourceStatus {
                checking_level: 1,
                ..ResourceStatus::default()
            },
        },
        tw_assignments: Default::default(),
    }
}

fn write_container(dir: &Path, properties: &ContainerProperties) {
    fs::create_dir_all(dir.join("content/01")).unwrap();
    properties.write(dir).unwrap();
    fs::write(dir.join("content/01/01.usx"), "Im Anfang").unwrap();
}

// ── Download ────────────────────────────────────────────────────────────────

#[test]
fn test_download_unknown_resource() {
    let (index, fetcher) = synced();
    let tmp = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(tmp.path());

    let err = download(&index, &library, &fetcher, "en", "gen", "nope").unwrap_err();
    assert!(matches!(err, SyncError::UnknownResource(slug) if slug == "en_gen_nope"));
}

#[test]
fn test_download_without_container_format() {
    let (index, fetcher) = synced();
    let conn = index.connection();
    let language_id = add_source_language(
        conn,
        &SourceLanguage {
            slug: "en".to_string(),
            name: "English".to_string(),
            direction: "ltr".to_string(),
        },
    )
    .unwrap();
    let project_id = add_project(
        conn,
        &Project {
            slug: "gen".to_string(),
            name: "Genesis".to_string(),
            ..Project::default()
        },
        &[],
        language_id,
    )
    .unwrap();
    let audio = Resource {
        slug: "audio".to_string(),
        name: "Audio Bible".to_string(),
        resource_type: ResourceType::Book,
        translate_mode: TranslateMode::Gl,
        checking_level: 3,
        comments: String::new(),
        pub_date: String::new(),
        license: String::new(),
        version: String::new(),
        formats: vec![ResourceFormat {
            package_version: "1".to_string(),
            mime_type: "audio/mp3".to_string(),
            modified_at: 0,
            url: "mock://gen/en/audio.mp3".to_string(),
            imported: false,
        }],
        words_assignments_url: None,
    };
    add_resource(conn, &audio, project_id).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(tmp.path());
    let err = download(&index, &library, &fetcher, "en", "gen", "audio").unwrap_err();
    assert!(matches!(err, SyncError::MissingContainerFormat(_)));
    assert!(!fetcher.requested("mock://gen/en/audio.mp3"));
}

#[test]
fn test_download_converts_legacy_book() {
    let (index, fetcher) = synced();
    let tmp = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(tmp.path().join("containers"));

    let container = download(&index, &library, &fetcher, "en", "gen", "ulb").unwrap();
    assert_eq!(container.slug(), "en_gen_ulb");
    assert!(library.is_open("en_gen_ulb"));

    let properties = &container.properties;
    assert_eq!(properties.project.categories, vec!["bible-ot"]);
    assert_eq!(properties.resource.status.checking_level, 3);
    assert_eq!(properties.modified_at, 20160201);
    assert_eq!(
        properties.tw_assignments["01"]["01"],
        vec!["//bible/tw/god".to_string()]
    );

    assert_eq!(container.chapters().unwrap(), vec!["01"]);
    assert_eq!(container.chunks("01").unwrap(), vec!["01", "03", "title"]);
    assert_eq!(
        container.read_chunk("01", "title").unwrap().as_deref(),
        Some("Chapter 1")
    );

    // No staging leftovers next to the container.
    let leftovers: Vec<_> = fs::read_dir(library.root())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec!["en_gen_ulb"]);
}

#[test]
fn test_download_tolerates_missing_word_assignments() {
    let (index, _) = synced();
    let fetcher = with_payloads(source_catalog()).without("mock://gen/en/tw_cat.json");
    let tmp = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(tmp.path());

    let container = download(&index, &library, &fetcher, "en", "gen", "ulb").unwrap();
    assert!(container.properties.tw_assignments.is_empty());
}

#[test]
fn test_download_fetch_failure() {
    let (index, _) = synced();
    let fetcher = source_catalog();
    let tmp = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(tmp.path());

    let err = download(&index, &library, &fetcher, "en", "gen", "ulb").unwrap_err();
    assert!(matches!(err, SyncError::Fetch(_)));
    assert!(!library.exists("en_gen_ulb"));
}

#[test]
fn test_download_canonical_container() {
    let tmp = tempfile::tempdir().unwrap();

    // Build a closed container to serve.
    let build = ContainerLibrary::new(tmp.path().join("build"));
    write_container(&build.open_path("de_gen_ulb"), &properties("de", "gen", "ulb"));
    let archive = build.close("de_gen_ulb").unwrap();
    let fetcher = source_catalog().bytes("mock://de/gen/ulb.tsrc", fs::read(archive).unwrap());

    let index = Index::open_memory().unwrap();
    synchronize_sources(&index, &fetcher, PRIMARY_URL, &settings(), &SilentProgress).unwrap();
    let (language, project, mut resource) =
        properties("de", "gen", "ulb").to_index_entities("mock://de/gen/ulb.tsrc");
    resource.formats[0].imported = false;
    let conn = index.connection();
    let language_id = add_source_language(conn, &language).unwrap();
    let project_id = add_project(conn, &project, &[], language_id).unwrap();
    add_resource(conn, &resource, project_id).unwrap();

    let library = ContainerLibrary::new(tmp.path().join("library"));
    let container = download(&index, &library, &fetcher, "de", "gen", "ulb").unwrap();
    assert_eq!(container.properties.project.name, "1. Mose");
    assert!(library.is_open("de_gen_ulb"));
    assert!(!library.is_closed("de_gen_ulb"));
    assert_eq!(
        container.read_chunk("01", "01").unwrap().as_deref(),
        Some("Im Anfang")
    );
}

// ── Import ──────────────────────────────────────────────────────────────────

#[test]
fn test_import_rejects_unknown_project() {
    let (index, _) = synced();
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("incoming");
    write_container(&source, &properties("de", "xyz", "ulb"));
    let library = ContainerLibrary::new(tmp.path().join("library"));

    let err = import_resource_container(&index, &library, &source).unwrap_err();
    assert!(matches!(err, SyncError::UnknownProject { project } if project == "xyz"));
    assert!(!library.exists("de_xyz_ulb"));
    assert!(index.get_source_language("de").unwrap().is_none());
}

#[test]
fn test_import_indexes_as_imported() {
    let (index, _) = synced();
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("incoming");
    write_container(&source, &properties("de", "gen", "ulb"));
    let library = ContainerLibrary::new(tmp.path().join("library"));

    let container = import_resource_container(&index, &library, &source).unwrap();
    assert_eq!(container.slug(), "de_gen_ulb");
    assert!(library.is_open("de_gen_ulb"));
    assert!(source.join("properties.json").is_file());

    let imported = index.get_imported_translations().unwrap();
    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].resource_container_slug(), "de_gen_ulb");
    assert!(imported[0].resource.formats[0].imported);
    assert_eq!(
        imported[0].resource.formats[0].mime_type,
        "application/tsrc+book"
    );

    // Imported content ignores level constraints.
    let filter = TranslationFilter {
        language: Some("de".to_string()),
        min_checking_level: Some(3),
        ..TranslationFilter::default()
    };
    assert_eq!(index.find_translations(&filter).unwrap().len(), 1);

    let path = index.get_category_path("de", "gen").unwrap();
    assert_eq!(path[0].slug, "bible-ot");
}

#[test]
fn test_import_replaces_previous_copy() {
    let (index, _) = synced();
    let tmp = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(tmp.path().join("library"));

    let first = tmp.path().join("first");
    write_container(&first, &properties("de", "gen", "ulb"));
    fs::write(first.join("content/01/02.usx"), "stale").unwrap();
    import_resource_container(&index, &library, &first).unwrap();

    let second = tmp.path().join("second");
    write_container(&second, &properties("de", "gen", "ulb"));
    let container = import_resource_container(&index, &library, &second).unwrap();

    assert_eq!(container.chunks("01").unwrap(), vec!["01"]);
    assert_eq!(index.get_imported_translations().unwrap().len(), 1);
}
