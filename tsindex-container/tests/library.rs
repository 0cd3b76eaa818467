use std::fs;
use std::path::Path;

use tsindex_container::properties::*;
use tsindex_container::*;
use tsindex_types::{ResourceType, TranslateMode};

fn properties(language: &str, project: &str, resource: &str) -> ContainerProperties {
    ContainerProperties {
        package_version: PACKAGE_VERSION.to_string(),
        modified_at: 1,
        content_mime_type: "text/usx".to_string(),
        language: LanguageInfo {
            slug: language.to_string(),
            name: "English".to_string(),
            direction: "ltr".to_string(),
        },
        project: ProjectInfo {
            slug: project.to_string(),
            name: "Genesis".to_string(),
            description: String::new(),
            icon: String::new(),
            sort: 1,
            chunks_url: String::new(),
            categories: vec![],
        },
        resource: ResourceInfo {
            slug: resource.to_string(),
            name: "ULB".to_string(),
            resource_type: ResourceType::Book,
            translate_mode: TranslateMode::All,
            status: ResourceStatus::default(),
        },
        tw_assignments: Default::default(),
    }
}

fn make_container(dir: &Path, props: &ContainerProperties) {
    fs::create_dir_all(dir.join("content/01")).unwrap();
    props.write(dir).unwrap();
    fs::write(dir.join("content/01/01.usx"), "In the beginning").unwrap();
}

#[test]
fn close_then_open_round_trip() {
    let root = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(root.path());
    let props = properties("en", "gen", "ulb");
    make_container(&library.open_path("en_gen_ulb"), &props);

    assert!(library.is_open("en_gen_ulb"));
    let archive = library.close("en_gen_ulb").unwrap();
    assert!(archive.is_file());
    assert!(!library.is_open("en_gen_ulb"));
    assert!(library.exists("en_gen_ulb"));

    // manifest is readable while closed
    assert_eq!(library.load_properties("en_gen_ulb").unwrap(), props);

    let container = library.open("en_gen_ulb").unwrap();
    assert!(!library.is_closed("en_gen_ulb"));
    assert_eq!(container.properties, props);
    assert_eq!(
        container.read_chunk("01", "01").unwrap().as_deref(),
        Some("In the beginning")
    );
}

#[test]
fn missing_containers() {
    let root = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(root.path());
    assert!(!library.exists("en_gen_ulb"));
    assert!(matches!(
        library.open("en_gen_ulb"),
        Err(ContainerError::NotFound(_))
    ));
    assert!(!library.delete("en_gen_ulb").unwrap());
}

#[test]
fn delete_removes_both_forms() {
    let root = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(root.path());
    make_container(&library.open_path("en_gen_ulb"), &properties("en", "gen", "ulb"));
    library.close("en_gen_ulb").unwrap();
    make_container(&library.open_path("en_gen_ulb"), &properties("en", "gen", "ulb"));

    assert!(library.delete("en_gen_ulb").unwrap());
    assert!(!library.exists("en_gen_ulb"));
}

#[test]
fn export_writes_closed_copy() {
    let root = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(root.path());
    make_container(&library.open_path("en_gen_ulb"), &properties("en", "gen", "ulb"));

    let exported = library.export_to("en_gen_ulb", out.path()).unwrap();
    assert_eq!(exported, out.path().join("en_gen_ulb.tsrc"));
    assert!(library.is_open("en_gen_ulb"));

    let other = ContainerLibrary::new(out.path());
    assert_eq!(other.load_properties("en_gen_ulb").unwrap().slug(), "en_gen_ulb");
}

#[test]
fn import_replaces_prior_copy_and_keeps_source() {
    let root = tempfile::tempdir().unwrap();
    let external = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(root.path().join("library"));

    let mut old = properties("en", "gen", "ulb");
    old.modified_at = 1;
    make_container(&library.open_path("en_gen_ulb"), &old);
    library.close("en_gen_ulb").unwrap();

    let mut new = properties("en", "gen", "ulb");
    new.modified_at = 2;
    let source = external.path().join("anything");
    make_container(&source, &new);

    let container = library.import_dir(&source).unwrap();
    assert_eq!(container.properties.modified_at, 2);
    assert!(!library.is_closed("en_gen_ulb"));
    assert!(source.join(PROPERTIES_FILE).is_file());
    assert_eq!(library.list().unwrap(), vec!["en_gen_ulb"]);
}

#[test]
fn install_moves_staged_directory() {
    let root = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(root.path());
    let staged = root.path().join(".staging");
    make_container(&staged, &properties("fr", "gen", "ulb"));

    let container = library.install(&staged).unwrap();
    assert_eq!(container.path, library.open_path("fr_gen_ulb"));
    assert!(!staged.exists());
}

#[test]
fn directory_without_manifest_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        ResourceContainer::load(dir.path()),
        Err(ContainerError::Invalid(_))
    ));
}

#[test]
fn manifest_requires_identity() {
    let mut props = properties("en", "gen", "ulb");
    props.resource.slug.clear();
    let json = serde_json::to_string(&props).unwrap();
    assert!(ContainerProperties::parse(&json).is_err());
}

#[test]
fn import_rejects_slugs_outside_the_root() {
    let root = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(root.path().join("library"));
    let victim = root.path().join("victim_gen_ulb");
    fs::create_dir_all(&victim).unwrap();
    fs::write(victim.join("precious.txt"), "keep me").unwrap();

    let source = root.path().join("external");
    make_container(&source, &properties("../victim", "gen", "ulb"));

    let err = library.import_dir(&source).unwrap_err();
    assert!(matches!(err, ContainerError::Invalid(_)));
    assert!(victim.join("precious.txt").is_file());
    assert!(library.install(&source).is_err());
    assert!(victim.join("precious.txt").is_file());
}

#[test]
fn manifest_slugs_must_be_plain_names() {
    for (language, project, resource) in [
        ("..", "gen", "ulb"),
        ("en", "a/b", "ulb"),
        ("en", "gen", "u\\lb"),
        ("en", ".", "ulb"),
    ] {
        let json = serde_json::to_string(&properties(language, project, resource)).unwrap();
        assert!(
            matches!(ContainerProperties::parse(&json), Err(ContainerError::Invalid(_))),
            "{language}/{project}/{resource} should be rejected"
        );
    }
}

#[test]
fn slug_operations_stay_inside_the_root() {
    let root = tempfile::tempdir().unwrap();
    let library = ContainerLibrary::new(root.path().join("library"));
    let outside = root.path().join("outside");
    fs::create_dir_all(&outside).unwrap();

    assert!(matches!(library.delete("../outside"), Err(ContainerError::Invalid(_))));
    assert!(outside.is_dir());
    assert!(library.open("../outside").is_err());
    assert!(library.close("../outside").is_err());
    assert!(library.load_properties("..").is_err());
    assert!(library.export_to("../outside", root.path()).is_err());
}
