mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use notegraph_core::config::loader::ConfigLoader;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ngraph", version, about = "Build the link graph of a markdown notes directory")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved values
    Doctor,

    /// Build the note graph and print every note with its title and links
    Build(BuildArgs),
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Notes directory (overrides the profile's notes_root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Maximum directory depth below the root (root is 0)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let loaded = ConfigLoader::load(cli.config.as_deref(), cli.profile.as_deref());
    let log_cfg = loaded.as_ref().map(|rc| rc.logging.clone()).unwrap_or_default();
    if let Err(e) = logging::init(&log_cfg) {
        let file = log_cfg.file.as_deref().unwrap_or_else(|| std::path::Path::new("-"));
        eprintln!("Failed to create log file {}: {e}", file.display());
        std::process::exit(1);
    }

    match cli.command {
        Commands::Doctor => cmd::doctor::run(cli.config.as_deref(), loaded),
        Commands::Build(args) => cmd::build::run(loaded, args).await,
    }
}
