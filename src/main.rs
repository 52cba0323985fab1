//! gobump - CLI entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::Confirm;
use semver::Version;
use tracing_subscriber::EnvFilter;

use gobump::error::BumpError;
use gobump::{BumpConfig, BumpPlan, BumpRequest, BumpType, apply_plan, plan_bump, read_versions};

/// Bump version constants and module paths in a Go library.
#[derive(Parser, Debug)]
#[command(name = "gobump")]
#[command(about = "Bump version constants and module paths in a Go library")]
#[command(version)]
struct Cli {
    /// Project root containing the bump files
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Registry file, relative to the working directory (defaults to .gobump.toml in the root, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current version and what each bump file records
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Bump the version in every registered file
    Bump {
        /// Which component to bump
        #[arg(value_enum, required_unless_present = "set_version")]
        level: Option<Level>,

        /// Explicit version to use instead of a bump level
        #[arg(long = "set-version", conflicts_with = "level")]
        set_version: Option<Version>,

        /// Print the plan without writing
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Bump level as accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Level {
    Major,
    Minor,
    Patch,
}

impl From<Level> for BumpType {
    fn from(level: Level) -> Self {
        match level {
            Level::Major => BumpType::Major,
            Level::Minor => BumpType::Minor,
            Level::Patch => BumpType::Patch,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = BumpConfig::load(&cli.root, cli.config.as_deref())
        .context("Failed to load bump file registry")?;

    match cli.command {
        Command::Show { json } => show(&cli.root, &config, json),
        Command::Bump {
            level,
            set_version,
            dry_run,
            yes,
            json,
        } => {
            let request = match (set_version, level) {
                (Some(version), _) => BumpRequest::Exact(version),
                (None, Some(level)) => BumpRequest::Level(level.into()),
                (None, None) => anyhow::bail!("Specify a bump level or --set-version"),
            };
            bump(&cli.root, &config, &request, dry_run, yes, json)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "gobump=debug" } else { "gobump=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn show(root: &Path, config: &BumpConfig, json: bool) -> Result<()> {
    let report = read_versions(root, config).context("Failed to read current version")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Version: {}", report.version);
    println!();
    println!("Bump files:");
    for file in &report.files {
        println!(
            "  {} ({}): {}",
            file.path.display(),
            file.updater,
            file.version
        );
    }

    Ok(())
}

fn bump(
    root: &Path,
    config: &BumpConfig,
    request: &BumpRequest,
    dry_run: bool,
    yes: bool,
    json: bool,
) -> Result<()> {
    let plan = plan_bump(root, config, request).context("Failed to plan version bump")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }

    if dry_run {
        if !json {
            println!();
            println!("Dry run complete. No changes made.");
        }
        return Ok(());
    }

    if !yes {
        println!();
        let confirmed = Confirm::new()
            .with_prompt("Proceed?")
            .default(true)
            .interact()
            .map_err(|_| BumpError::Cancelled)?;

        if !confirmed {
            return Err(BumpError::Cancelled.into());
        }
    }

    let written = apply_plan(&plan).context("Failed to write bump files")?;

    if !json {
        for change in plan.files.iter().filter(|c| c.is_changed()) {
            println!("  [DONE] Updated {}", change.path.display());
        }
        println!();
        println!(
            "Bumped {} -> {} ({} file{})",
            plan.current_version,
            plan.next_version,
            written,
            if written == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

fn print_plan(plan: &BumpPlan) {
    println!("Version: {} -> {}", plan.current_version, plan.next_version);
    println!();
    println!("Bump files:");
    for change in &plan.files {
        let status = if change.is_changed() { "UPDATE" } else { "SKIP" };
        println!(
            "  [{}] {} ({}): {} -> {}",
            status,
            change.path.display(),
            change.updater,
            change.current,
            change.next
        );
    }
}
