use anyhow::Result;
use clap::Parser;
use psrq::commands::list;
use psrq::runtime::RealRuntime;
use std::path::PathBuf;

/// psrq - query installed PowerShell resources
///
/// Scans the platform module and script install locations and prints the
/// resources it finds, reconstructed from their metadata files.
///
/// Examples:
///   psrq list                            # everything, latest versions
///   psrq list Pester                     # one resource by name
///   psrq list Pester -v "[4.0.0,5.0.0)"  # within a version range
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Search root directory (overrides defaults; also via PSRQ_PATH)
    #[arg(
        long = "path",
        short = 'p',
        env = "PSRQ_PATH",
        value_name = "PATH",
        global = true
    )]
    pub search_path: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List installed resources
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Resource names to match, case-insensitively (default: all)
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Exact version or range expression, e.g. "1.2.3" or "[1.0,2.0)"
    #[arg(long = "version", short = 'v', value_name = "VERSION")]
    pub version: Option<String>,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    match cli.command {
        Commands::List(args) => list(
            runtime,
            args.names,
            args.version,
            cli.search_path,
            args.json,
        ),
    }
}
