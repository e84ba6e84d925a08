//! Command-line interface definitions for readmekit

use clap::{Parser, Subcommand, ValueEnum};
use readmekit::config::CONFIG_FILE_NAME;
use std::path::PathBuf;

/// Identifier scheme for newly created sections
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum IdScheme {
    /// Title slug plus a counter (reproducible)
    #[default]
    Sequential,
    /// Title slug plus a millisecond timestamp
    Clock,
}

/// CLI structure for the readmekit application
#[derive(Parser)]
#[command(name = "readmekit")]
#[command(version)]
#[command(about = "Assemble a README from reorderable sections", long_about = None)]
pub struct Cli {
    /// Project configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for readmekit
#[derive(Subcommand)]
pub enum Commands {
    /// Write a project configuration file
    Init {
        /// Where composed READMEs are written
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Custom catalog file to use by default
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Start new documents empty instead of with the default sections
        #[arg(long)]
        clean: bool,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// List section templates
    Catalog {
        /// Only show templates whose title contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Custom catalog file (overrides the configuration)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Compose a README and write it out
    Build {
        /// Operations to apply, as a TOML plan file
        #[arg(short, long)]
        plan: Option<PathBuf>,

        /// Start from an empty document instead of the default sections
        #[arg(long)]
        clean: bool,

        /// Start from an existing markdown file split into sections
        #[arg(long, conflicts_with = "clean")]
        import: Option<PathBuf>,

        /// Output file (defaults to the configured output, README.md)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the document instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Custom catalog file (overrides the configuration)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Edit sections interactively
    Shell {
        /// Start from an empty document instead of the default sections
        #[arg(long)]
        clean: bool,

        /// Start from an existing markdown file split into sections
        #[arg(long, conflicts_with = "clean")]
        import: Option<PathBuf>,

        /// Default file for the 'save' command
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Custom catalog file (overrides the configuration)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// How new section ids are generated
        #[arg(long, value_enum, default_value = "sequential")]
        ids: IdScheme,
    },
}
