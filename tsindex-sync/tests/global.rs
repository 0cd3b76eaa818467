mod common;

use common::*;
use serde_json::json;
use tsindex_db::Index;
use tsindex_sync::*;

fn update(index: &Index, fetcher: &MockFetcher, force: bool) -> GlobalReport {
    update_catalogs(index, fetcher, force, &settings(), &SilentProgress).unwrap()
}

#[test]
fn test_force_registers_catalogs() {
    let index = Index::open_memory().unwrap();
    update(&index, &global_catalogs(), true);

    let catalogs = index.get_catalogs().unwrap();
    assert_eq!(catalogs.len(), 4);
    let langnames = index.get_catalog("langnames").unwrap().unwrap();
    assert_eq!(langnames.url, "mock://td/exports/langnames.json");
    assert!(langnames.modified_at > 0);
}

#[test]
fn test_without_registration_nothing_is_fetched() {
    let index = Index::open_memory().unwrap();
    let fetcher = global_catalogs();
    let report = update(&index, &fetcher, false);

    assert!(report.updated.is_empty());
    assert!(fetcher.requests.borrow().is_empty());
}

#[test]
fn test_catalogs_processed_in_order() {
    let index = Index::open_memory().unwrap();
    let fetcher = global_catalogs();
    let report = update(&index, &fetcher, true);

    assert_eq!(
        report.updated,
        vec![
            "langnames",
            "new-language-questions",
            "temp-langnames",
            "approved-temp-langnames"
        ]
    );
    assert_eq!(
        *fetcher.requests.borrow(),
        vec![
            "mock://td/exports/langnames.json",
            "mock://td/api/questionnaire/",
            "mock://td/api/templanguages/",
            "mock://td/api/templanguages/assignment/changed/",
        ]
    );
}

#[test]
fn test_langnames_and_gateway_default() {
    let index = Index::open_memory().unwrap();
    update(&index, &global_catalogs(), true);

    let en = index.get_target_language("en").unwrap().unwrap();
    assert!(en.is_gateway_language);
    assert_eq!(en.region, "Europe");
    let es = index.get_target_language("es").unwrap().unwrap();
    assert!(!es.is_gateway_language);
    let ar = index.get_target_language("ar").unwrap().unwrap();
    assert!(ar.is_gateway_language);
    assert_eq!(ar.direction, "rtl");
}

#[test]
fn test_approved_temp_languages_leave_merged_view() {
    let index = Index::open_memory().unwrap();
    let report = update(&index, &global_catalogs(), true);

    // qaa-x-def names an unknown language and is skipped.
    assert_eq!(report.skipped_approvals, 1);

    let slugs: Vec<String> = index
        .get_target_languages()
        .unwrap()
        .into_iter()
        .map(|l| l.slug)
        .collect();
    assert_eq!(slugs, vec!["ar", "en", "es", "qaa-x-def", "qaa-x-ghi"]);

    let approved = index.get_approved_target_language("qaa-x-abc").unwrap().unwrap();
    assert_eq!(approved.slug, "es");
    assert!(index.get_approved_target_language("qaa-x-def").unwrap().is_none());
}

#[test]
fn test_questionnaires_indexed() {
    let index = Index::open_memory().unwrap();
    update(&index, &global_catalogs(), true);

    let questionnaires = index.get_questionnaires().unwrap();
    assert_eq!(questionnaires.len(), 1);
    assert_eq!(questionnaires[0].td_id, 12);
    assert_eq!(questionnaires[0].data_fields.get("ln"), Some(&100));

    let questions = index.get_questions(12).unwrap();
    assert_eq!(questions.len(), 2);
    assert!(questions[0].is_required);
    assert_eq!(questions[1].depends_on, Some(100));
}

#[test]
fn test_rerun_replaces_tables() {
    let index = Index::open_memory().unwrap();
    update(&index, &global_catalogs(), true);

    let fetcher = global_catalogs().json(
        "mock://td/exports/langnames.json",
        json!([{"lc": "fr", "ln": "français", "ld": "ltr"}]),
    );
    update(&index, &fetcher, false);

    assert!(index.get_target_language("en").unwrap().is_none());
    assert!(index.get_target_language("fr").unwrap().is_some());
    // "es" is gone, so the approval onto it is skipped too.
    assert!(index.get_approved_target_language("qaa-x-abc").unwrap().is_none());
    assert_eq!(index.stats().unwrap().questionnaires, 1);
}

#[test]
fn test_malformed_feed_is_an_error_and_keeps_previous_table() {
    let index = Index::open_memory().unwrap();
    update(&index, &global_catalogs(), true);
    let stamp = index.get_catalog("langnames").unwrap().unwrap().modified_at;

    let fetcher = global_catalogs().bytes("mock://td/exports/langnames.json", b"[{".to_vec());
    let err = update_catalogs(&index, &fetcher, false, &settings(), &SilentProgress).unwrap_err();
    match err {
        SyncError::Parse { url, .. } => assert_eq!(url, "mock://td/exports/langnames.json"),
        other => panic!("expected parse error, got {other:?}"),
    }

    assert_eq!(index.stats().unwrap().target_languages, 3);
    assert_eq!(
        index.get_catalog("langnames").unwrap().unwrap().modified_at,
        stamp
    );
    // Nothing after the failing catalog was fetched.
    assert_eq!(fetcher.requests.borrow().len(), 1);
}

#[test]
fn test_missing_language_feed_leaves_approvals_alone() {
    let index = Index::open_memory().unwrap();
    update(&index, &global_catalogs(), true);
    assert!(index.get_approved_target_language("qaa-x-abc").unwrap().is_some());

    let fetcher = global_catalogs().without("mock://td/exports/langnames.json");
    let err = update_catalogs(&index, &fetcher, false, &settings(), &SilentProgress).unwrap_err();
    assert!(matches!(err, SyncError::Fetch(FetchError::NotFound(_))));

    assert!(!fetcher.requested("mock://td/api/templanguages/assignment/changed/"));
    let approved = index.get_approved_target_language("qaa-x-abc").unwrap().unwrap();
    assert_eq!(approved.slug, "es");
}

#[test]
fn test_later_failure_keeps_earlier_catalogs() {
    let index = Index::open_memory().unwrap();
    let fetcher = global_catalogs().without("mock://td/api/templanguages/");

    let err = update_catalogs(&index, &fetcher, true, &settings(), &SilentProgress).unwrap_err();
    assert!(matches!(err, SyncError::Fetch(_)));

    let stats = index.stats().unwrap();
    assert_eq!(stats.target_languages, 3);
    assert_eq!(stats.questionnaires, 1);
    assert_eq!(stats.temp_target_languages, 0);
    assert_eq!(
        index.get_catalog("approved-temp-langnames").unwrap().unwrap().modified_at,
        0
    );
}

#[test]
fn test_cancellation_stops_before_next_catalog() {
    let index = Index::open_memory().unwrap();
    let fetcher = global_catalogs();
    let only_first = |_tag: &str, _total: usize, completed: usize| completed == 0;

    let report =
        update_catalogs(&index, &fetcher, true, &settings(), &only_first).unwrap();
    assert!(report.cancelled);
    assert_eq!(report.updated, vec!["langnames"]);
    assert_eq!(index.stats().unwrap().target_languages, 3);
    assert_eq!(index.stats().unwrap().questionnaires, 0);
}
