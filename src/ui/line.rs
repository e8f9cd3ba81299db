use std::future::Future;
use std::io::{self, Write};

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::core::controller::{Dispatch, LyricsLookupController};
use crate::core::state::{UiEvent, UiState};
use crate::error::Result;

/// Line-oriented view for pipes and CI: one query per stdin line, the
/// rendered text of each result on stdout, notices on stderr.
pub struct LineUi<W: Write> {
    out: W,
}

impl LineUi<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineUi<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn notice(&self, level: &str, message: &str) {
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S.%6fZ").to_string();
        eprintln!("{}  {} {}", timestamp, level, message);
    }

    /// Returns true once the state is final for the current lookup
    fn show(&mut self, event: UiEvent) -> io::Result<bool> {
        match event {
            UiEvent::Prompt(message) => {
                self.notice("WARN", &message);
                Ok(true)
            }
            UiEvent::Render(state) if state.is_loading() => {
                self.notice("INFO", &state.text());
                Ok(false)
            }
            UiEvent::Render(state) => {
                self.print_state(&state)?;
                Ok(state.input_enabled)
            }
        }
    }

    fn print_state(&mut self, state: &UiState) -> io::Result<()> {
        writeln!(self.out, "{}", state.text())?;
        self.out.flush()
    }

    /// Show updates until the lookup's final state. Returns false if
    /// `interrupt` fires first.
    async fn wait_for_result<F: Future>(
        &mut self,
        updates: &mut mpsc::UnboundedReceiver<UiEvent>,
        interrupt: F,
    ) -> Result<bool> {
        tokio::pin!(interrupt);
        loop {
            tokio::select! {
                update = updates.recv() => match update {
                    Some(event) => {
                        if self.show(event)? {
                            return Ok(true);
                        }
                    }
                    None => return Ok(true),
                },
                _ = &mut interrupt => return Ok(false),
            }
        }
    }

    pub async fn run(
        &mut self,
        controller: &LyricsLookupController,
        updates: &mut mpsc::UnboundedReceiver<UiEvent>,
    ) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => {
                    warn!("Interrupted");
                    break;
                }
            };

            let Some(raw) = line else {
                debug!("End of input");
                break;
            };

            let handle = match controller.validate_and_dispatch(&raw) {
                Dispatch::Started(handle) => handle,
                Dispatch::Rejected(_) => {
                    if let Some(event) = updates.recv().await {
                        self.show(event)?;
                    }
                    continue;
                }
                Dispatch::Busy => continue,
                Dispatch::Closed => break,
            };

            if !self.wait_for_result(updates, tokio::signal::ctrl_c()).await? {
                warn!("Interrupted");
                break;
            }

            // The task ends once the controller is free for the next line
            if let Err(e) = handle.await {
                debug!("Lookup task ended abnormally: {}", e);
            }
        }

        controller.teardown();
        Ok(())
    }
}
