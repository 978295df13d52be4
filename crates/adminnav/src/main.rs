//! adminnav - Admin navigation menu inspector

mod cli;

use adminnav_core::{Container, MenuManifest, RequestInvoker};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "adminnav",
    version,
    about = "Inspect and validate admin navigation menus",
    long_about = "Loads a TOML menu manifest, builds its navigation items for a given\n\
                  principal and request path, and shows how a renderer would see them.\n\
                  \n\
                  Examples:\n\
                    adminnav check                              # Validate the default manifest\n\
                    adminnav inspect --path /admin/users        # Resolve items for a guest\n\
                    adminnav inspect -u ada -a view-users       # Resolve items for a user\n\
                    adminnav inspect --all --json               # Include hidden items, as JSON\n\
                  \n\
                  Environment Variables:\n\
                    ADMINNAV_MANIFEST                # Override manifest path\n\
                    ADMINNAV_FORMAT                  # Force output format: json|table\n\
                    ADMINNAV_NO_COLOR                # Disable ANSI colors (log-friendly)\n\
                    ADMINNAV_LOG                     # Log filter (e.g. debug, adminnav_core=trace)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Path to the menu manifest (default: <config dir>/adminnav/menu.toml)
    #[arg(long, global = true, env = "ADMINNAV_MANIFEST")]
    manifest: Option<PathBuf>,

    /// Force output format (json|table)
    #[arg(long, global = true, env = "ADMINNAV_FORMAT", value_parser = ["json", "table"])]
    format: Option<String>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, global = true, env = "ADMINNAV_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Resolve every item for a principal and request path (default)
    Inspect {
        /// Request path used for active-state checks
        #[arg(long, short = 'p', default_value = "/")]
        path: String,
        /// Authenticated user id (guest when neither --user nor --ability is given)
        #[arg(long, short = 'u')]
        user: Option<String>,
        /// Ability granted to the user (repeatable)
        #[arg(long = "ability", short = 'a')]
        abilities: Vec<String>,
        /// Include hidden items
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the manifest and print the load report
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ADMINNAV_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let manifest_path = cli
        .manifest
        .or_else(cli::default_manifest_path)
        .context("Could not determine manifest path, pass --manifest")?;
    debug!(manifest = %manifest_path.display(), "using menu manifest");

    let force_json = cli.format.as_deref() == Some("json");
    let no_color = cli.no_color;

    match cli.mode.unwrap_or(Mode::Inspect {
        path: "/".to_string(),
        user: None,
        abilities: Vec::new(),
        all: false,
        json: false,
    }) {
        Mode::Inspect {
            path,
            user,
            abilities,
            all,
            json,
        } => {
            run_inspect(
                manifest_path,
                path,
                user,
                abilities,
                all,
                json || force_json,
                no_color,
            )?;
        }
        Mode::Check => {
            run_check(manifest_path)?;
        }
    }

    Ok(())
}

fn run_inspect(
    manifest_path: PathBuf,
    path: String,
    user: Option<String>,
    abilities: Vec<String>,
    include_hidden: bool,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let manifest = MenuManifest::load(&manifest_path)
        .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;

    let guard = Arc::new(cli::build_guard(user, abilities));
    let invoker = Arc::new(RequestInvoker::new(guard.clone()).with_path(path));
    let container = Container::new(guard, invoker);

    let (items, report) = manifest.build(&container);
    if report.has_errors() {
        eprint!("{}", cli::format_report(&report));
    }

    let views = cli::resolve_views(&items, include_hidden)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&views).context("Failed to serialize items")?
        );
    } else if views.is_empty() {
        println!("No visible navigation items");
    } else {
        println!("{}", cli::format_item_table(&views, no_color));
    }

    Ok(())
}

fn run_check(manifest_path: PathBuf) -> Result<()> {
    let report = cli::check_manifest(&manifest_path);

    print!("{}", cli::format_report(&report));

    if report.has_fatal_errors() {
        anyhow::bail!("Manifest {} is unusable", manifest_path.display());
    }
    if report.has_blocking_errors() {
        anyhow::bail!(
            "{} of {} entries in {} are invalid",
            report.items_skipped,
            report.items_loaded + report.items_skipped,
            manifest_path.display()
        );
    }

    Ok(())
}
