use tsindex_db::*;
use tsindex_types::{TargetLanguage, TempTargetLanguage};

fn target(slug: &str, name: &str, anglicized: &str) -> TargetLanguage {
    TargetLanguage {
        slug: slug.to_string(),
        name: name.to_string(),
        anglicized_name: anglicized.to_string(),
        direction: "ltr".to_string(),
        region: "Europe".to_string(),
        is_gateway_language: false,
    }
}

fn temp(slug: &str, name: &str) -> TempTargetLanguage {
    TempTargetLanguage {
        language: target(slug, name, ""),
        approved_target_language_slug: None,
    }
}

fn setup_db() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    add_target_language(&conn, &target("en", "English", "English")).unwrap();
    add_target_language(&conn, &target("es", "Español", "Spanish")).unwrap();
    add_target_language(&conn, &target("de", "Deutsch", "German")).unwrap();
    add_temp_target_language(&conn, &temp("qaa-x-abc", "Abc Language")).unwrap();
    add_temp_target_language(&conn, &temp("qaa-x-spa", "Spanglish")).unwrap();
    conn
}

fn slugs(languages: &[TargetLanguage]) -> Vec<&str> {
    languages.iter().map(|l| l.slug.as_str()).collect()
}

#[test]
fn merged_view_includes_unapproved_temp_languages() {
    let conn = setup_db();
    assert_eq!(
        slugs(&get_target_languages(&conn).unwrap()),
        vec!["de", "en", "es", "qaa-x-abc", "qaa-x-spa"]
    );
}

#[test]
fn approved_temp_languages_are_excluded() {
    let conn = setup_db();
    assert!(set_approved_target_language(&conn, "qaa-x-spa", "es").unwrap());

    let merged = get_target_languages(&conn).unwrap();
    assert_eq!(slugs(&merged), vec!["de", "en", "es", "qaa-x-abc"]);

    let approved = get_approved_target_language(&conn, "qaa-x-spa").unwrap().unwrap();
    assert_eq!(approved.slug, "es");
    assert!(get_approved_target_language(&conn, "qaa-x-abc").unwrap().is_none());

    // the temp row itself is still resolvable by slug
    let temp = get_temp_target_language(&conn, "qaa-x-spa").unwrap().unwrap();
    assert_eq!(temp.language.name, "Spanglish");
    assert_eq!(temp.approved_target_language_slug.as_deref(), Some("es"));
}

#[test]
fn approval_requires_known_languages() {
    let conn = setup_db();
    assert!(!set_approved_target_language(&conn, "qaa-x-abc", "zz").unwrap());
    assert!(!set_approved_target_language(&conn, "qaa-x-missing", "es").unwrap());
    assert!(get_approved_target_language(&conn, "qaa-x-abc").unwrap().is_none());

    let mut with_unknown = temp("qaa-x-new", "New");
    with_unknown.approved_target_language_slug = Some("zz".to_string());
    let err = add_temp_target_language(&conn, &with_unknown).unwrap_err();
    assert!(matches!(err, OperationError::UnknownTargetLanguage(ref s) if s == "zz"));
}

#[test]
fn temp_slug_shadowed_by_canonical_slug() {
    let conn = setup_db();
    add_temp_target_language(&conn, &temp("de", "Temp Deutsch")).unwrap();
    let merged = get_target_languages(&conn).unwrap();
    assert_eq!(merged.iter().filter(|l| l.slug == "de").count(), 1);
    assert_eq!(get_target_language(&conn, "de").unwrap().unwrap().name, "Deutsch");
}

#[test]
fn lookup_prefers_canonical_then_temp() {
    let conn = setup_db();
    assert_eq!(get_target_language(&conn, "es").unwrap().unwrap().name, "Español");
    assert_eq!(
        get_target_language(&conn, "qaa-x-abc").unwrap().unwrap().name,
        "Abc Language"
    );
    assert!(get_target_language(&conn, "xx").unwrap().is_none());
}

#[test]
fn find_ranks_slug_prefix_over_name_prefix_over_substring() {
    let conn = setup_db();
    add_target_language(&conn, &target("fr", "Français", "French")).unwrap();
    add_target_language(&conn, &target("xsp", "Kispanish", "Kispanish")).unwrap();

    assert_eq!(slugs(&find_target_language(&conn, "es").unwrap()), vec!["es"]);

    // slug prefix: en, es; substring only: de, French, "Abc Language"
    assert_eq!(
        slugs(&find_target_language(&conn, "E").unwrap()),
        vec!["en", "es", "de", "fr", "qaa-x-abc"]
    );

    // name prefix: Spanish, Spanglish; substring only: xsp
    assert_eq!(
        slugs(&find_target_language(&conn, "sp").unwrap()),
        vec!["es", "qaa-x-spa", "xsp"]
    );
}

#[test]
fn find_treats_wildcards_literally() {
    let conn = setup_db();
    assert!(find_target_language(&conn, "%").unwrap().is_empty());
    assert!(find_target_language(&conn, "_").unwrap().is_empty());
    assert_eq!(find_target_language(&conn, "  ").unwrap().len(), 5);
}

#[test]
fn find_folds_case_beyond_ascii() {
    let conn = setup_db();
    add_target_language(&conn, &target("el", "Ελληνικά", "Greek")).unwrap();
    add_temp_target_language(&conn, &temp("qaa-x-ru", "Русский диалект")).unwrap();

    assert_eq!(slugs(&find_target_language(&conn, "ΕΛΛ").unwrap()), vec!["el"]);
    assert_eq!(slugs(&find_target_language(&conn, "ДИАЛЕКТ").unwrap()), vec!["qaa-x-ru"]);
    // "Español" matches through its accented letter too
    assert_eq!(slugs(&find_target_language(&conn, "ESPAÑ").unwrap()), vec!["es"]);
}

#[test]
fn clearing_tables() {
    let conn = setup_db();
    set_approved_target_language(&conn, "qaa-x-spa", "es").unwrap();
    assert_eq!(clear_approved_target_languages(&conn).unwrap(), 1);
    assert!(get_approved_target_language(&conn, "qaa-x-spa").unwrap().is_none());

    clear_temp_target_languages(&conn).unwrap();
    clear_target_languages(&conn).unwrap();
    assert!(get_target_languages(&conn).unwrap().is_empty());
}
