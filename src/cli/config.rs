use clap::{Args, Subcommand};
use crate::error::Result;
use crate::config::{Config as AppConfig, HOSTED_API_URL, LOCAL_API_URL};
use crate::config::env::{EnvParser, EnvVars};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: Option<ConfigCommands>,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// List environment variables that override the configuration
    Keys,
}

pub async fn execute(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.command.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("Current configuration:");
            println!("  api_base_url: {}", config.api_base_url);
            println!("  user_agent: {}", config.user_agent);

            let env_vars = EnvParser::get_all_lyricsfinder_vars();
            if !env_vars.is_empty() {
                println!("\nEnvironment overrides:");
                for (key, value) in env_vars {
                    println!("  {} = {}", key, value);
                }
            }
        }

        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path()?.display());
        }

        ConfigCommands::Keys => {
            println!("{:<28} {}", EnvVars::API_BASE_URL, "Base address of the lyrics service");
            println!("{:<28} {}", EnvVars::USER_AGENT, "User-Agent header for lookups");
            println!("{:<28} {}", EnvVars::FORCE_LINE_UI, "Use the line view even on a terminal");
            println!("\nKnown services:");
            println!("  hosted  {}", HOSTED_API_URL);
            println!("  local   {} (--local)", LOCAL_API_URL);
        }
    }

    Ok(())
}
