//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tsindex")]
#[command(about = "Index and manage translation source resources", long_about = None)]
pub(crate) struct Cli {
    /// Index database file (overrides the settings file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Resource container directory (overrides the settings file)
    #[arg(long, global = true)]
    pub containers: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filters for commands that list translations.
#[derive(Args, Clone, Default)]
pub(crate) struct TranslationArgs {
    /// Source language slug (e.g., en)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Project slug (e.g., gen, obs)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Resource slug (e.g., ulb, tn)
    #[arg(short, long)]
    pub resource: Option<String>,

    /// Resource type: book, help, dict, man or bundle
    #[arg(long = "type")]
    pub resource_type: Option<String>,

    /// Translate mode: all or gl
    #[arg(long)]
    pub mode: Option<String>,

    /// Minimum checking level
    #[arg(long)]
    pub min_level: Option<i32>,

    /// Maximum checking level
    #[arg(long)]
    pub max_level: Option<i32>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Synchronize the source catalog (projects, languages, resources)
    Sync {
        /// Primary catalog URL (defaults to the configured one)
        #[arg(long)]
        url: Option<String>,
    },

    /// Refresh chunk markers for Bible books
    Chunks,

    /// Refresh target languages, temp languages and questionnaires
    UpdateCatalogs {
        /// Re-register the global catalogs against the configured host
        #[arg(short, long)]
        force: bool,
    },

    /// Download a resource into the container directory
    Download {
        language: String,
        project: String,
        resource: String,
    },

    /// Import a resource container directory
    Import {
        /// Directory holding properties.json
        dir: PathBuf,
    },

    /// Write a closed copy of a container to a directory
    Export {
        /// Container slug (language_project_resource)
        slug: String,
        /// Destination directory
        dest: PathBuf,
    },

    /// Open (extract) a closed container
    Open { slug: String },

    /// Close (archive) an open container
    Close { slug: String },

    /// Delete a container from disk (the index keeps its rows)
    Delete { slug: String },

    /// List containers on disk
    Containers,

    /// List translations matching filters
    Translations {
        #[command(flatten)]
        filter: TranslationArgs,

        /// Only list translations with an imported container
        #[arg(long)]
        imported: bool,
    },

    /// List projects in a language
    Projects {
        #[arg(default_value = "en")]
        language: String,

        /// Do not fall back to other languages
        #[arg(long)]
        no_fallback: bool,
    },

    /// Show one level of the category tree
    Categories {
        #[arg(default_value = "en")]
        language: String,

        /// Parent category id (0 = top level)
        #[arg(long, default_value_t = 0)]
        parent: i64,

        /// Only nodes with resources in this translate mode (all or gl)
        #[arg(long)]
        mode: Option<String>,
    },

    /// List selectable target languages
    Targets,

    /// Search target languages by slug or name
    Find { query: String },

    /// Show index statistics
    Stats,

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and their sources
    Show,

    /// Print the settings file path
    Path,
}
