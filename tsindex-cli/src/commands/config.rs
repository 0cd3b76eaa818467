use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::Context;
use crate::CliError;
use crate::settings::settings_path;

/// Show resolved settings and where each one comes from.
pub(crate) fn run_config_show(ctx: &Context) -> Result<(), CliError> {
    log::info!(
        "{}",
        "tsindex Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match settings_path() {
        Some(p) if p.exists() => log::info!(
            "  Settings file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        ),
        Some(p) => log::info!(
            "  Settings file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "  Settings file: {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }
    crate::log_blank();

    let (db_path, db_source) = &ctx.db_path;
    let (root, root_source) = &ctx.container_root;
    log::info!(
        "  {:<18} {} {}",
        "database",
        db_path.display(),
        format!("({db_source})").if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "  {:<18} {} {}",
        "containers",
        root.display(),
        format!("({root_source})").if_supports_color(Stdout, |t| t.dimmed()),
    );

    let sync = &ctx.settings.sync;
    log::info!("  {:<18} {}", "primary catalog", sync.primary_catalog_url);
    log::info!("  {:<18} {}", "global host", sync.global_catalog_host);
    log::info!("  {:<18} {}", "chunks", sync.chunks_url_template);
    log::info!("  {:<18} {}", "academy", sync.academy_url_template);
    log::info!("  {:<18} {}", "manuals", sync.academy_manuals.join(", "));
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match settings_path() {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::config("Could not determine config directory")),
    }
}
