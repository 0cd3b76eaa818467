//! Read-only listings over the index.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tsindex_db::TranslationFilter;
use tsindex_types::{TargetLanguage, Translation};

use super::{Context, parse_resource_type, parse_translate_mode, truncate_str};
use crate::CliError;
use crate::cli_types::TranslationArgs;

pub(crate) fn run_translations(
    ctx: &Context,
    args: TranslationArgs,
    imported: bool,
) -> Result<(), CliError> {
    let index = ctx.open_index()?;
    let translations = if imported {
        index.get_imported_translations()?
    } else {
        let filter = TranslationFilter {
            language: args.language,
            project: args.project,
            resource: args.resource,
            resource_type: args.resource_type.as_deref().map(parse_resource_type).transpose()?,
            translate_mode: args.mode.as_deref().map(parse_translate_mode).transpose()?,
            min_checking_level: args.min_level,
            max_checking_level: args.max_level,
        };
        index.find_translations(&filter)?
    };

    if translations.is_empty() {
        log::info!("{}", "No matching translations".if_supports_color(Stdout, |t| t.dimmed()));
        return Ok(());
    }
    let library = ctx.library();
    for translation in &translations {
        print_translation(translation, library.exists(&translation.resource_container_slug()));
    }
    crate::log_blank();
    log::info!("{} translations", translations.len());
    Ok(())
}

fn print_translation(translation: &Translation, on_disk: bool) {
    let resource = &translation.resource;
    let imported = resource.formats.iter().any(|f| f.imported);
    let marker = if imported {
        "imported"
    } else if on_disk {
        "downloaded"
    } else {
        ""
    };
    log::info!(
        "  {:<24} {:<28} {:<4} L{} {:<3} {}",
        translation.resource_container_slug(),
        truncate_str(&resource.name, 28),
        resource.resource_type.as_str(),
        resource.checking_level,
        resource.translate_mode.as_str(),
        marker.if_supports_color(Stdout, |t| t.green()),
    );
}

pub(crate) fn run_projects(
    ctx: &Context,
    language: &str,
    enable_default_language: bool,
) -> Result<(), CliError> {
    let index = ctx.open_index()?;
    let projects = index.get_projects(language, enable_default_language)?;
    for project in &projects {
        let fallback = if project.source_language_slug != language {
            format!("({})", project.source_language_slug)
        } else {
            String::new()
        };
        log::info!(
            "  {:>4} {:<12} {} {}",
            project.sort,
            project.slug,
            project.name,
            fallback.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("{} projects", projects.len());
    Ok(())
}

pub(crate) fn run_categories(
    ctx: &Context,
    language: &str,
    parent_id: i64,
    mode: Option<&str>,
) -> Result<(), CliError> {
    let index = ctx.open_index()?;
    let mode = mode.map(parse_translate_mode).transpose()?;
    let nodes = index.get_project_categories(parent_id, language, mode)?;
    if nodes.is_empty() {
        log::info!("{}", "Nothing at this level".if_supports_color(Stdout, |t| t.dimmed()));
    }
    for node in &nodes {
        if node.is_project() {
            log::info!("  {:<12} {}", node.project_slug, node.name);
        } else {
            log::info!(
                "  {:<12} {} {}",
                node.category_slug.if_supports_color(Stdout, |t| t.bold()),
                node.name,
                format!("[--parent {}]", node.category_id).if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
    Ok(())
}

fn print_target_language(language: &TargetLanguage) {
    let gateway = if language.is_gateway_language { "GL" } else { "" };
    log::info!(
        "  {:<14} {:<28} {:<24} {:<3} {}",
        language.slug,
        truncate_str(&language.name, 28),
        truncate_str(&language.anglicized_name, 24),
        language.direction,
        gateway.if_supports_color(Stdout, |t| t.cyan()),
    );
}

pub(crate) fn run_targets(ctx: &Context) -> Result<(), CliError> {
    let index = ctx.open_index()?;
    let languages = index.get_target_languages()?;
    for language in &languages {
        print_target_language(language);
    }
    log::info!("{} target languages", languages.len());
    Ok(())
}

pub(crate) fn run_find(ctx: &Context, query: &str) -> Result<(), CliError> {
    let index = ctx.open_index()?;
    let matches = index.find_target_language(query)?;
    if matches.is_empty() {
        log::info!("No language matches '{}'", query);
        return Ok(());
    }
    for language in &matches {
        print_target_language(language);
    }
    Ok(())
}
