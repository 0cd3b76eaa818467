//! Remote endpoints a sync talks to.

use serde::{Deserialize, Serialize};

/// Slugs of the global catalogs, in the order they must be processed.
pub const GLOBAL_CATALOGS: [&str; 4] = [
    "langnames",
    "new-language-questions",
    "temp-langnames",
    "approved-temp-langnames",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// The legacy primary catalog listing every project.
    pub primary_catalog_url: String,
    /// Host serving the global language catalogs.
    pub global_catalog_host: String,
    /// Chunk feed for Bible books; `{project}` is replaced by the book slug.
    pub chunks_url_template: String,
    /// translationAcademy volume feed; `{manual}` is replaced by the manual slug.
    pub academy_url_template: String,
    /// translationAcademy manuals indexed after the resource catalogs.
    pub academy_manuals: Vec<String>,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            primary_catalog_url: "https://api.unfoldingword.org/ts/txt/2/catalog.json".to_string(),
            global_catalog_host: "https://td.unfoldingword.org".to_string(),
            chunks_url_template: "https://api.unfoldingword.org/bible/txt/1/{project}/chunks.json"
                .to_string(),
            academy_url_template: "https://api.unfoldingword.org/ta/txt/1/en/{manual}.json"
                .to_string(),
            academy_manuals: [
                "ta-intro",
                "ta-process",
                "ta-translate",
                "ta-checking",
                "ta-audio",
                "ta-gateway",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl SyncSettings {
    pub fn chunks_url(&self, project_slug: &str) -> String {
        self.chunks_url_template.replace("{project}", project_slug)
    }

    pub fn academy_url(&self, manual: &str) -> String {
        self.academy_url_template.replace("{manual}", manual)
    }

    /// Where a global catalog lives on the configured host.
    pub fn global_catalog_url(&self, slug: &str) -> Option<String> {
        let host = self.global_catalog_host.trim_end_matches('/');
        let path = match slug {
            "langnames" => "/exports/langnames.json",
            "new-language-questions" => "/api/questionnaire/",
            "temp-langnames" => "/api/templanguages/",
            "approved-temp-langnames" => "/api/templanguages/assignment/changed/",
            _ => return None,
        };
        Some(format!("{host}{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_catalog_urls() {
        let settings = SyncSettings {
            global_catalog_host: "https://td.example.org/".to_string(),
            ..SyncSettings::default()
        };
        assert_eq!(
            settings.global_catalog_url("langnames").as_deref(),
            Some("https://td.example.org/exports/langnames.json")
        );
        assert!(settings.global_catalog_url("unknown").is_none());
        for slug in GLOBAL_CATALOGS {
            assert!(settings.global_catalog_url(slug).is_some());
        }
    }

    #[test]
    fn test_templates() {
        let settings = SyncSettings::default();
        assert!(settings.chunks_url("gen").ends_with("/gen/chunks.json"));
        assert!(settings.academy_url("ta-intro").ends_with("/ta-intro.json"));
        assert_eq!(settings.academy_manuals.len(), 6);
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings: SyncSettings =
            serde_json::from_str(r#"{"academy_manuals": ["ta-intro"]}"#).unwrap();
        assert_eq!(settings.academy_manuals, vec!["ta-intro"]);
        assert_eq!(settings.global_catalog_host, "https://td.unfoldingword.org");
    }
}
