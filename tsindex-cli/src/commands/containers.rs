use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tsindex_sync::{HttpFetcher, SyncError, download, import_resource_container};

use super::Context;
use crate::CliError;

/// Download a resource and install it as an open container.
pub(crate) fn run_download(
    ctx: &Context,
    language: &str,
    project: &str,
    resource: &str,
) -> Result<(), CliError> {
    let index = ctx.open_index()?;
    let library = ctx.library();
    let fetcher = HttpFetcher::new().map_err(|e| CliError::Sync(SyncError::Fetch(e)))?;

    let container = download(&index, &library, &fetcher, language, project, resource)?;
    log::info!(
        "{} {} to {}",
        "Downloaded".if_supports_color(Stdout, |t| t.green()),
        container.slug(),
        container.path.display(),
    );
    Ok(())
}

/// Import an external container directory.
pub(crate) fn run_import(ctx: &Context, dir: &Path) -> Result<(), CliError> {
    let index = ctx.open_index()?;
    let container = import_resource_container(&index, &ctx.library(), dir)?;
    log::info!(
        "{} {}",
        "Imported".if_supports_color(Stdout, |t| t.green()),
        container.slug().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

pub(crate) fn run_export(ctx: &Context, slug: &str, dest: &Path) -> Result<(), CliError> {
    let path = ctx.library().export_to(slug, dest)?;
    log::info!("Exported {} to {}", slug, path.display());
    Ok(())
}

pub(crate) fn run_open(ctx: &Context, slug: &str) -> Result<(), CliError> {
    let container = ctx.library().open(slug)?;
    log::info!("Opened {} at {}", slug, container.path.display());
    Ok(())
}

pub(crate) fn run_close(ctx: &Context, slug: &str) -> Result<(), CliError> {
    let path = ctx.library().close(slug)?;
    log::info!("Closed {} into {}", slug, path.display());
    Ok(())
}

pub(crate) fn run_delete(ctx: &Context, slug: &str) -> Result<(), CliError> {
    if ctx.library().delete(slug)? {
        log::info!("Deleted {}", slug);
    } else {
        log::warn!("No container named {}", slug);
    }
    Ok(())
}

/// List containers with their state.
pub(crate) fn run_list(ctx: &Context) -> Result<(), CliError> {
    let library = ctx.library();
    let slugs = library.list()?;
    if slugs.is_empty() {
        log::info!(
            "{}",
            format!("No containers in {}", library.root().display())
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    for slug in &slugs {
        let state = if library.is_open(slug) { "open" } else { "closed" };
        match library.load_properties(slug) {
            Ok(properties) => log::info!(
                "  {:<30} {:<7} {} / {}",
                slug.if_supports_color(Stdout, |t| t.cyan()),
                state,
                properties.project.name,
                properties.resource.name,
            ),
            Err(e) => log::warn!("  {:<30} {:<7} unreadable: {}", slug, state, e),
        }
    }
    Ok(())
}
