use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::Context;
use crate::CliError;

pub(crate) fn run_stats(ctx: &Context) -> Result<(), CliError> {
    let (db_path, _) = &ctx.db_path;
    if !db_path.exists() {
        log::warn!("No index found at {}", db_path.display());
        log::info!("Run 'tsindex sync' to create one.");
        return Ok(());
    }

    let index = ctx.open_index()?;
    let stats = index.stats()?;

    log::info!(
        "{}",
        "Index Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Source languages:   {:>8}", stats.source_languages);
    log::info!("  Projects:           {:>8}", stats.projects);
    log::info!("  Categories:         {:>8}", stats.categories);
    log::info!("  Resources:          {:>8}", stats.resources);
    log::info!("  Imported:           {:>8}", stats.imported_resources);
    log::info!("  Target languages:   {:>8}", stats.target_languages);
    log::info!(
        "  Temp languages:     {:>8} ({} approved)",
        stats.temp_target_languages,
        stats.approved_temp_target_languages,
    );
    log::info!("  Questionnaires:     {:>8}", stats.questionnaires);
    log::info!("  Chunk markers:      {:>8}", stats.chunk_markers);
    crate::log_blank();

    let catalogs = index.get_catalogs()?;
    if !catalogs.is_empty() {
        log::info!("{}", "Catalogs".if_supports_color(Stdout, |t| t.bold()));
        for catalog in &catalogs {
            let updated = if catalog.modified_at > 0 {
                chrono::DateTime::from_timestamp(catalog.modified_at, 0)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default()
            } else {
                "never".to_string()
            };
            log::info!("  {:<26} {}", catalog.slug, updated);
        }
    }
    index.close()?;
    Ok(())
}
