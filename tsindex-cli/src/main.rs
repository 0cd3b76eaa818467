//! tsindex CLI
//!
//! Command-line interface for synchronizing, browsing and managing the
//! translation resource catalog index.

mod cli_types;
mod commands;
mod error;
mod progress;
mod settings;

use std::io::Write;

use clap::Parser;
use log::{Level, LevelFilter};

use cli_types::{Cli, Commands, ConfigAction};
use commands::Context;
pub(crate) use error::CliError;
use settings::Settings;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Plain messages at info level; `--verbose` adds timestamps and debug output.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).target(env_logger::Target::Stdout);
    if !verbose {
        builder.format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level, record.args()),
        });
    }
    builder.parse_default_env().init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let ctx = Context::new(settings, cli.db.as_deref(), cli.containers.as_deref(), cli.quiet);

    match cli.command {
        Commands::Sync { url } => commands::sync::run_sync(&ctx, url),
        Commands::Chunks => commands::sync::run_chunks(&ctx),
        Commands::UpdateCatalogs { force } => commands::sync::run_update_catalogs(&ctx, force),
        Commands::Download {
            language,
            project,
            resource,
        } => commands::containers::run_download(&ctx, &language, &project, &resource),
        Commands::Import { dir } => commands::containers::run_import(&ctx, &dir),
        Commands::Export { slug, dest } => commands::containers::run_export(&ctx, &slug, &dest),
        Commands::Open { slug } => commands::containers::run_open(&ctx, &slug),
        Commands::Close { slug } => commands::containers::run_close(&ctx, &slug),
        Commands::Delete { slug } => commands::containers::run_delete(&ctx, &slug),
        Commands::Containers => commands::containers::run_list(&ctx),
        Commands::Translations { filter, imported } => {
            commands::browse::run_translations(&ctx, filter, imported)
        }
        Commands::Projects {
            language,
            no_fallback,
        } => commands::browse::run_projects(&ctx, &language, !no_fallback),
        Commands::Categories {
            language,
            parent,
            mode,
        } => commands::browse::run_categories(&ctx, &language, parent, mode.as_deref()),
        Commands::Targets => commands::browse::run_targets(&ctx),
        Commands::Find { query } => commands::browse::run_find(&ctx, &query),
        Commands::Stats => commands::stats::run_stats(&ctx),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&ctx),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }
}
