#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::{Value, json};
use tsindex_sync::{Fetch, FetchError, SyncSettings};

/// Serves canned bodies by URL and records what was asked for.
#[derive(Default)]
pub struct MockFetcher {
    responses: HashMap<String, Vec<u8>>,
    pub requests: RefCell<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), body.to_string().into_bytes());
        self
    }

    pub fn bytes(mut self, url: &str, body: Vec<u8>) -> Self {
        self.responses.insert(url.to_string(), body);
        self
    }

    pub fn without(mut self, url: &str) -> Self {
        self.responses.remove(url);
        self
    }

    pub fn requested(&self, url: &str) -> bool {
        self.requests.borrow().iter().any(|u| u == url)
    }
}

impl Fetch for MockFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(url.to_string()))
    }
}

pub const PRIMARY_URL: &str = "mock://catalog.json";

pub fn settings() -> SyncSettings {
    SyncSettings {
        primary_catalog_url: PRIMARY_URL.to_string(),
        global_catalog_host: "mock://td".to_string(),
        chunks_url_template: "mock://chunks/{project}.json".to_string(),
        academy_url_template: "mock://ta/{manual}.json".to_string(),
        academy_manuals: vec!["ta-intro".to_string()],
    }
}

/// A small catalog: Genesis (en, fr) with inline help, OBS (en), and one
/// translationAcademy manual.
pub fn source_catalog() -> MockFetcher {
    MockFetcher::new()
        .json(
            PRIMARY_URL,
            json!([
                {"slug": "gen", "lang_catalog": "mock://gen/languages.json", "sort": "1", "meta": ["bible-ot"]},
                {"slug": "obs", "lang_catalog": "mock://obs/languages.json", "sort": 100, "meta": []}
            ]),
        )
        .json(
            "mock://gen/languages.json",
            json!([
                {
                    "language": {"slug": "en", "name": "English", "direction": "ltr"},
                    "project": {"name": "Genesis", "desc": "The first book", "meta": ["Old Testament"]},
                    "res_catalog": "mock://gen/en/resources.json"
                },
                {
                    "language": {"slug": "fr", "name": "français"},
                    "project": {"name": "Genèse", "meta": ["Ancien Testament"]},
                    "res_catalog": "mock://gen/fr/resources.json"
                }
            ]),
        )
        .json(
            "mock://gen/en/resources.json",
            json!([
                {
                    "slug": "ulb",
                    "name": "Unlocked Literal Bible",
                    "status": {"checking_level": "3", "publish_date": "2016-01-01", "license": "CC BY-SA 4.0", "version": "3"},
                    "source": "mock://gen/en/ulb/source.json",
                    "notes": "mock://gen/en/notes.json",
                    "checking_questions": "mock://gen/en/questions.json",
                    "terms": "mock://bible/en/terms.json",
                    "tw_cat": "mock://gen/en/tw_cat.json",
                    "date_modified": "20160101"
                },
                {
                    "slug": "udb",
                    "name": "Unlocked Dynamic Bible",
                    "status": {"checking_level": 2},
                    "source": "mock://gen/en/udb/source.json",
                    "notes": "",
                    "terms": "mock://bible/en/terms.json"
                }
            ]),
        )
        .json(
            "mock://gen/fr/resources.json",
            json!([
                {"slug": "ulb", "name": "Bible", "status": {"checking_level": 1}, "source": "mock://gen/fr/ulb/source.json"}
            ]),
        )
        .json(
            "mock://obs/languages.json",
            json!([
                {
                    "language": {"slug": "en", "name": "English", "direction": "ltr"},
                    "project": {"name": "Open Bible Stories", "meta": []},
                    "res_catalog": "mock://obs/en/resources.json"
                }
            ]),
        )
        .json(
            "mock://obs/en/resources.json",
            json!([
                {
                    "slug": "obs",
                    "name": "Open Bible Stories",
                    "status": {"checking_level": "3"},
                    "source": "mock://obs/en/source.json",
                    "terms": "mock://obs/en/terms.json"
                }
            ]),
        )
        .json(
            "mock://ta/ta-intro.json",
            json!({
                "meta": {
                    "language": {"lc": "en", "ln": "English", "ld": "ltr"},
                    "manual": "intro",
                    "manual_title": "Introduction to translationAcademy",
                    "volume": 1,
                    "status": {"checking_level": "3"},
                    "mod": 1460000000
                },
                "articles": [{"id": "ta_intro", "title": "Introduction", "text": "Welcome"}]
            }),
        )
}

/// Global catalogs served from the mock host.
pub fn global_catalogs() -> MockFetcher {
    MockFetcher::new()
        .json(
            "mock://td/exports/langnames.json",
            json!([
                {"lc": "en", "ln": "English", "ang": "English", "ld": "ltr", "lr": "Europe", "gl": true},
                {"lc": "es", "ln": "español", "ang": "Spanish", "ld": "ltr", "lr": "Europe"},
                {"lc": "ar", "ln": "العربية", "ang": "Arabic", "ld": "rtl", "lr": "Asia", "gl": "1"}
            ]),
        )
        .json(
            "mock://td/api/questionnaire/",
            json!({
                "languages": [{
                    "slug": "en",
                    "name": "English",
                    "dir": "ltr",
                    "questionnaire_id": "12",
                    "language_data": {"ln": 100},
                    "questions": [
                        {"id": 100, "text": "What is the language called?", "required": true, "input_type": "string", "sort": 1},
                        {"id": 101, "text": "Where is it spoken?", "input_type": "string", "sort": "2", "depends_on": "100"}
                    ]
                }]
            }),
        )
        .json(
            "mock://td/api/templanguages/",
            json!([
                {"lc": "qaa-x-abc", "ln": "Abc", "ld": "ltr"},
                {"lc": "qaa-x-def", "ln": "Def", "ld": "ltr"},
                {"lc": "qaa-x-ghi", "ln": "Ghi", "ld": "ltr"}
            ]),
        )
        .json(
            "mock://td/api/templanguages/assignment/changed/",
            json!([{"qaa-x-abc": "es"}, {"qaa-x-def": "zz"}]),
        )
}
