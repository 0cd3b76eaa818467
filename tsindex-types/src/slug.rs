//! Slug helpers shared by the index and the container library.

/// Identity of a resource container: `language_project_resource`.
pub fn container_slug(language: &str, project: &str, resource: &str) -> String {
    format!("{language}_{project}_{resource}")
}

/// Split a container slug back into `(language, project, resource)`.
///
/// Language and resource slugs never contain `_`, so the first and last
/// `_` are the separators and anything between belongs to the project.
pub fn parse_container_slug(slug: &str) -> Option<(&str, &str, &str)> {
    let first = slug.find('_')?;
    let last = slug.rfind('_')?;
    if first == last {
        return None;
    }
    let language = &slug[..first];
    let project = &slug[first + 1..last];
    let resource = &slug[last + 1..];
    if language.is_empty() || project.is_empty() || resource.is_empty() {
        return None;
    }
    Some((language, project, resource))
}

/// Normalize a chapter/chunk id coming from a legacy feed.
///
/// Numeric ids lose their leading zeros and are then left-padded to at
/// least two digits (`"001"` → `"01"`, `"7"` → `"07"`, `"119"` → `"119"`).
/// Words such as `"front"` or `"title"` are returned untouched.
pub fn normalize_slug(slug: &str) -> String {
    let trimmed = slug.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.to_string();
    }
    let stripped = trimmed.trim_start_matches('0');
    let digits = if stripped.is_empty() { "0" } else { stripped };
    format!("{digits:0>2}")
}
