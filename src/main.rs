use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

use sitegrade::commands;
use sitegrade::config::Config;

#[derive(Parser)]
#[command(name = "sitegrade")]
#[command(about = "Generate branded visual reports from website audit scans", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a sitegrade project in the current directory
    Init(commands::init::Args),

    /// Render a single scan file into a report artifact
    Render(commands::render::Args),

    /// Watch a directory and render every scan file that appears
    Watch(commands::watch::Args),
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "sitegrade=debug" } else { "sitegrade=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = Config::load_or_default()?;

    match cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Render(args) => commands::render::run(args, &config),
        Commands::Watch(args) => commands::watch::run(args, &config),
    }
}
