use std::path::PathBuf;

use clap::{ArgAction, Parser};
use python_switchers::commands::execute_generate;
use python_switchers::config::{Config, Overrides, Settings};
use python_switchers::error::AppError;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::load()?;
    let overrides = Overrides {
        excluded_patterns: cli.excluded_patterns,
        outfile_basename: cli.outfile_basename,
        no_default_excludes: cli.no_default_excludes,
        dry_run: cli.dry_run,
        json: cli.json,
        search_roots: cli.search_roots,
    };
    let settings = Settings::resolve(config, overrides)?;
    execute_generate(&settings)?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[derive(Parser)]
#[command(
    name = "python-switchers",
    version,
    about = "Detects all python installations and creates shell functions to switch between them."
)]
struct Cli {
    /// Add a pattern (regex, matched from the start of the path) to exclude
    /// when looking for python installations. Use as many as needed.
    /// Added to the defaults: .*virtualenv.*, .*pkgs.*, .*anaconda/envs.*
    #[arg(short = 'e', long = "excluded-patterns", value_name = "REGEX", action = ArgAction::Append)]
    excluded_patterns: Vec<String>,

    /// Output file basename, without extension, for the generated shell
    /// functions (default: $HOME/.python_switchers.{sh,fish}).
    #[arg(short = 'o', long = "outfile-basename", value_name = "PATH")]
    outfile_basename: Option<PathBuf>,

    /// Only show the detected installations, don't write the shell files.
    #[arg(short = 'd', long = "dry-run", action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Print the dry-run listing as JSON.
    #[arg(long = "json", action = ArgAction::SetTrue, requires = "dry_run")]
    json: bool,

    /// Walk this directory instead of querying the locate database.
    /// Use as many as needed.
    #[arg(long = "search-root", value_name = "DIR", action = ArgAction::Append)]
    search_roots: Vec<PathBuf>,

    /// Do not apply the built-in exclusion patterns.
    #[arg(long = "no-default-excludes", action = ArgAction::SetTrue)]
    no_default_excludes: bool,

    /// Log detection details to stderr.
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}
