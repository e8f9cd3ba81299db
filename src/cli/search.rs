use std::sync::Arc;

use clap::Args;
use tracing::debug;

use crate::config::Config;
use crate::core::controller::{Dispatch, LyricsLookupController};
use crate::core::result::LyricsResult;
use crate::core::state::{DisplaySink, UiState};
use crate::error::{LyricsFinderError, Result};

#[derive(Args)]
pub struct SearchArgs {
    /// Song title, URL, or "Artist - Title"
    #[arg(value_name = "QUERY", num_args = 1.., required = true)]
    query: Vec<String>,

    /// Print the lookup result as JSON
    #[arg(long)]
    json: bool,
}

/// One-shot commands only print the final result
struct LogSink;

impl DisplaySink for LogSink {
    fn render(&self, state: UiState) {
        debug!("Display: {:?}", state.display);
    }

    fn prompt(&self, message: &str) {
        eprintln!("{}", message);
    }
}

pub async fn execute(args: SearchArgs, config: &Config) -> Result<()> {
    let api = Arc::new(config.create_lyrics_api()?);
    let controller = LyricsLookupController::new(api, Arc::new(LogSink));

    let raw = args.query.join(" ");
    let result = match controller.validate_and_dispatch(&raw) {
        Dispatch::Started(handle) => handle.await?,
        Dispatch::Rejected(prompt) => {
            return Err(LyricsFinderError::Validation(prompt.to_string()));
        }
        Dispatch::Busy | Dispatch::Closed => None,
    };

    let Some(result) = result else {
        return Err(LyricsFinderError::Internal(anyhow::anyhow!("Lookup was cancelled")));
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result).map_err(anyhow::Error::from)?);
    } else {
        println!("{}", result.display_text());
    }

    if let LyricsResult::Failure { .. } = result {
        std::process::exit(1);
    }

    Ok(())
}
