use anyhow::{Context, Result};
use batch_patcher::config::{apply_table, load_from_path, FileStatus, PatchTable};
use batch_patcher::report;
use clap::Parser;
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const ROOT_ENV: &str = "BATCH_PATCHER_ROOT";

#[derive(Parser)]
#[command(name = "batch-patcher")]
#[command(
    about = "Remove unused imports and stale references with literal replacements",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Project root the table paths are relative to (defaults to the current directory)
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Load the patch table from a TOML file instead of the built-in one
    #[arg(short, long)]
    table: Option<PathBuf>,

    /// Show unified diff of every cleaned file
    #[arg(short, long)]
    diff: bool,

    /// Print the patch table and exit without touching any file
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let table = match &cli.table {
        Some(path) => load_from_path(path)
            .with_context(|| format!("could not load patch table {}", path.display()))?,
        None => PatchTable::builtin(),
    };

    if cli.list {
        println!("{}", report::table_listing(&table));
        return Ok(());
    }

    let root = resolve_root(cli.workspace)?;
    debug!(root = %root.display(), files = table.len(), "starting run");

    cmd_run(&table, &root, cli.diff);
    Ok(())
}

/// Resolve the project root.
///
/// Priority order:
/// 1. Explicit --workspace flag
/// 2. BATCH_PATCHER_ROOT environment variable
/// 3. Current directory
fn resolve_root(cli_workspace: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = cli_workspace {
        return path
            .canonicalize()
            .with_context(|| format!("workspace does not exist: {}", path.display()));
    }

    if let Ok(env_path) = env::var(ROOT_ENV) {
        let path = PathBuf::from(&env_path);
        if path.is_dir() {
            return path
                .canonicalize()
                .with_context(|| format!("could not resolve {ROOT_ENV}: {env_path}"));
        }
        eprintln!(
            "{}",
            format!("Warning: {ROOT_ENV} is set but path doesn't exist: {env_path}").yellow()
        );
    }

    env::current_dir().context("could not determine the current directory")
}

fn cmd_run(table: &PatchTable, root: &Path, show_diff: bool) {
    println!("{}", report::BANNER.bold());

    let run = apply_table(table, root);

    for file in &run.files {
        println!("{}", report::status_line(file));

        if show_diff {
            if let FileStatus::Cleaned { original, patched } = &file.status {
                print!("{}", report::diff(&file.full_path, original, patched));
            }
        }
    }

    for line in report::summary_lines(&run) {
        println!("{line}");
    }
}
