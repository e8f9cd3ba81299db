use std::sync::Arc;

use clap::Args;
use tracing::info;

use crate::config::Config;
use crate::core::controller::LyricsLookupController;
use crate::core::state::ChannelSink;
use crate::error::Result;
use crate::ui::line::LineUi;
use crate::ui::{terminal, UiMode};

#[derive(Args, Default)]
pub struct UiArgs {
    /// Read queries line by line from stdin instead of opening the full-screen view
    #[arg(long)]
    pub lines: bool,
}

pub async fn execute(args: UiArgs, config: &Config, mode: UiMode) -> Result<()> {
    let api = Arc::new(config.create_lyrics_api()?);
    info!("Using lyrics service at {}", api.base_url());
    let (sink, mut updates) = ChannelSink::new();
    let controller = LyricsLookupController::new(api, Arc::new(sink));

    if args.lines || mode == UiMode::Line {
        info!("Reading queries from stdin");
        LineUi::stdout().run(&controller, &mut updates).await
    } else {
        terminal::run(controller, updates, &config.api_base_url).await
    }
}
