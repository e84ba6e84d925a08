//! readmekit - README composer
//!
//! A CLI tool for assembling a README from reorderable, editable sections.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, IdScheme};
use readmekit::config::ProjectConfig;
use readmekit::{
    available, export, shell, split_markdown, Catalog, ClockIds, IdMinter, Plan,
    SectionCollection, SequentialIds, Session,
};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main entry point for the readmekit CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; --verbose raises the floor to info
    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Info);
    }
    logger.init();

    match cli.command {
        Commands::Init {
            output,
            catalog,
            clean,
            force,
        } => {
            handle_init_command(&cli.config, output, catalog, clean, force)?;
        }

        Commands::Catalog { search, catalog } => {
            let config = load_config(&cli.config)?;
            let catalog = load_catalog(catalog.as_deref(), &config)?;
            handle_catalog_command(&catalog, search.as_deref().unwrap_or(""));
        }

        Commands::Build {
            plan,
            clean,
            import,
            output,
            stdout,
            catalog,
        } => {
            let config = load_config(&cli.config)?;
            let catalog = load_catalog(catalog.as_deref(), &config)?;
            let output = output.unwrap_or_else(|| config.output.clone());
            handle_build_command(
                catalog,
                &config,
                plan.as_deref(),
                clean,
                import.as_deref(),
                &output,
                stdout,
            )?;
        }

        Commands::Shell {
            clean,
            import,
            output,
            catalog,
            ids,
        } => {
            let config = load_config(&cli.config)?;
            let catalog = load_catalog(catalog.as_deref(), &config)?;
            let output = output.unwrap_or_else(|| config.output.clone());
            handle_shell_command(catalog, &config, clean, import.as_deref(), &output, ids)?;
        }
    }

    Ok(())
}

/// Handle the init command
fn handle_init_command(
    path: &Path,
    output: Option<PathBuf>,
    catalog: Option<PathBuf>,
    clean: bool,
    force: bool,
) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite",
            path.display()
        );
    }

    if let Some(catalog_path) = &catalog {
        Catalog::load(catalog_path)
            .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    }

    let defaults = ProjectConfig::default();
    let config = ProjectConfig {
        output: output.unwrap_or(defaults.output),
        catalog,
        clean_start: clean,
    };
    config
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✓ Created {}", path.display());
    println!("\nNext steps:");
    println!("  readmekit catalog        # list section templates");
    println!("  readmekit build          # write {}", config.output.display());

    Ok(())
}

/// Handle the catalog command
fn handle_catalog_command(catalog: &Catalog, search: &str) {
    println!("Available section templates (* = included by default):\n");

    for template in available(&SectionCollection::clean_start(), catalog, search) {
        let marker = if catalog.is_default(&template.id) {
            "*"
        } else {
            " "
        };
        println!("  {} {:<20} {}", marker, template.id, template.title);
    }

    println!("\nUsage: readmekit build [--plan plan.toml] [-o README.md]");
}

/// Handle the build command
fn handle_build_command(
    catalog: Catalog,
    config: &ProjectConfig,
    plan: Option<&Path>,
    clean: bool,
    import: Option<&Path>,
    output: &Path,
    stdout: bool,
) -> Result<()> {
    let collection = starting_collection(&catalog, config, clean, import)?;
    let mut session = Session::with_collection(catalog, collection, Box::new(SequentialIds::new()));

    if let Some(plan_path) = plan {
        let plan = Plan::load(plan_path)
            .with_context(|| format!("Failed to load plan {}", plan_path.display()))?;
        let changed = session.apply_all(&plan.operations);
        log::info!(
            "Applied {} operations ({} changed the document)",
            plan.operations.len(),
            changed
        );
    }

    let document = session.compose();

    if stdout {
        // Exactly the exported bytes, no trailing newline added
        let mut out = std::io::stdout().lock();
        out.write_all(document.as_bytes())
            .and_then(|()| out.flush())
            .context("Failed to write document to stdout")?;
        return Ok(());
    }

    export::write_document(&document, output)
        .with_context(|| format!("Failed to export README to {}", output.display()))?;
    println!(
        "✓ Successfully wrote {} sections to {}",
        session.collection().len(),
        output.display()
    );

    Ok(())
}

/// Handle the shell command
fn handle_shell_command(
    catalog: Catalog,
    config: &ProjectConfig,
    clean: bool,
    import: Option<&Path>,
    output: &Path,
    ids: IdScheme,
) -> Result<()> {
    let collection = starting_collection(&catalog, config, clean, import)?;
    let minter: Box<dyn IdMinter> = match ids {
        IdScheme::Sequential => Box::new(SequentialIds::new()),
        IdScheme::Clock => Box::new(ClockIds::new()),
    };
    let mut session = Session::with_collection(catalog, collection, minter);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shell::run(&mut session, output, stdin.lock(), stdout.lock())
        .context("Interactive session failed")?;

    Ok(())
}

/// Load the project configuration, falling back to defaults when absent
fn load_config(path: &Path) -> Result<ProjectConfig> {
    ProjectConfig::load_or_default(path)
        .with_context(|| format!("Failed to load {}", path.display()))
}

/// Load the catalog named on the command line or in the configuration
fn load_catalog(cli_path: Option<&Path>, config: &ProjectConfig) -> Result<Catalog> {
    let path: Option<PathBuf> = cli_path
        .map(Path::to_path_buf)
        .or_else(|| config.catalog.clone());

    match path {
        Some(path) => Catalog::load(&path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

/// Initial collection: imported file, clean start or catalog defaults
fn starting_collection(
    catalog: &Catalog,
    config: &ProjectConfig,
    clean: bool,
    import: Option<&Path>,
) -> Result<SectionCollection> {
    if let Some(path) = import {
        let markdown = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let collection = SectionCollection::from_sections(split_markdown(&markdown));
        log::info!(
            "Imported {} sections from {}",
            collection.len(),
            path.display()
        );
        return Ok(collection);
    }

    if clean || config.clean_start {
        Ok(SectionCollection::clean_start())
    } else {
        Ok(SectionCollection::bootstrap(catalog))
    }
}
