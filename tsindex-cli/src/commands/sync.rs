use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tsindex_sync::{HttpFetcher, SyncError, synchronize_sources, update_catalogs, update_chunks};

use super::Context;
use crate::CliError;
use crate::progress::BarProgress;

fn fetcher() -> Result<HttpFetcher, CliError> {
    HttpFetcher::new().map_err(|e| CliError::Sync(SyncError::Fetch(e)))
}

/// Synchronize the source catalog.
pub(crate) fn run_sync(ctx: &Context, url: Option<String>) -> Result<(), CliError> {
    let index = ctx.open_index()?;
    let settings = &ctx.settings.sync;
    let url = url.unwrap_or_else(|| settings.primary_catalog_url.clone());

    log::info!(
        "{} {}",
        "Synchronizing".if_supports_color(Stdout, |t| t.bold()),
        url.if_supports_color(Stdout, |t| t.cyan()),
    );
    let progress = BarProgress::new(ctx.quiet);
    let result = synchronize_sources(&index, &fetcher()?, &url, settings, &progress);
    progress.finish();
    let report = result?;

    log::info!(
        "  {} projects, {} languages, {} resources, {} manuals",
        report.projects,
        report.languages,
        report.resources,
        report.manuals,
    );
    if report.cancelled {
        log::warn!("Synchronization was cancelled; partial results were kept");
    }
    index.close()?;
    Ok(())
}

/// Refresh chunk markers.
pub(crate) fn run_chunks(ctx: &Context) -> Result<(), CliError> {
    let index = ctx.open_index()?;
    let progress = BarProgress::new(ctx.quiet);
    let result = update_chunks(&index, &fetcher()?, &progress);
    progress.finish();
    let report = result?;

    log::info!(
        "{} {} chunk markers for {} projects",
        "Indexed".if_supports_color(Stdout, |t| t.green()),
        report.markers,
        report.projects,
    );
    for slug in &report.failed {
        log::warn!(
            "  {} no chunks for {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            slug,
        );
    }
    index.close()?;
    Ok(())
}

/// Refresh the global language catalogs.
pub(crate) fn run_update_catalogs(ctx: &Context, force: bool) -> Result<(), CliError> {
    let index = ctx.open_index()?;
    let progress = BarProgress::new(ctx.quiet);
    let result = update_catalogs(&index, &fetcher()?, force, &ctx.settings.sync, &progress);
    progress.finish();
    let report = result?;

    if report.updated.is_empty() && !report.cancelled {
        log::info!(
            "{}",
            "No global catalogs registered; run with --force to register them"
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    for slug in &report.updated {
        log::info!(
            "  {} {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            slug,
        );
    }
    if report.cancelled {
        log::warn!("Catalog update was cancelled; updated catalogs were kept");
    }
    if report.skipped_approvals > 0 {
        log::warn!(
            "  Skipped {} approvals naming unknown languages",
            report.skipped_approvals
        );
    }
    index.close()?;
    Ok(())
}
