use clap::{Parser, Subcommand};

mod cli;
mod config;
mod core;
mod error;
mod ui;
mod utils;

use cli::{search, ui as ui_cmd};
use config::Config;
use error::Result;

#[derive(Parser)]
#[command(name = "lyricsfinder")]
#[command(about = "Look up song lyrics from a lyrics service")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Base address of the lyrics service
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Use the local development service
    #[arg(long, global = true)]
    local: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up lyrics once and print them
    Search(search::SearchArgs),

    /// Open the interactive search screen (default)
    Ui(ui_cmd::UiArgs),

    /// Show configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let ui_mode = ui::UiMode::detect();
    let command = cli.command.unwrap_or_else(|| Commands::Ui(ui_cmd::UiArgs::default()));

    // The full-screen view owns the terminal
    let suppress_logs = matches!(&command, Commands::Ui(args) if !args.lines) && ui_mode == ui::UiMode::Terminal;
    utils::logging::init_logging(cli.verbose, suppress_logs)?;

    let config = Config::load(cli.config.as_deref())?
        .with_overrides(cli.base_url.as_deref(), cli.local)?;

    match command {
        Commands::Search(args) => search::execute(args, &config).await,
        Commands::Ui(args) => ui_cmd::execute(args, &config, ui_mode).await,
        Commands::Config(args) => cli::config::execute(args, &config).await,
    }
}
