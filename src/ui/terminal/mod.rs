//! Full-screen search view
//!
//! - `input`: the query line editor
//! - `app`: screen state and key handling
//! - `renderer`: drawing the screen with ratatui
//!
//! The event loop is the only place screen state changes. Key presses come
//! from crossterm's event stream, display updates from the controller's
//! channel.

pub mod app;
pub mod input;
pub mod renderer;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::debug;

use crate::core::controller::{Dispatch, LyricsLookupController};
use crate::core::state::UiEvent;
use crate::error::Result;
use app::{Action, SearchScreen};

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

pub async fn run(
    controller: LyricsLookupController,
    updates: mpsc::UnboundedReceiver<UiEvent>,
    api_base_url: &str,
) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, &controller, updates, api_base_url).await;

    // Results of a lookup still in flight belong to a screen that is gone
    controller.teardown();
    restore_terminal(&mut terminal)?;
    outcome
}

async fn event_loop(
    terminal: &mut Tui,
    controller: &LyricsLookupController,
    mut updates: mpsc::UnboundedReceiver<UiEvent>,
    api_base_url: &str,
) -> Result<()> {
    let mut screen = SearchScreen::new();
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(250));

    loop {
        let completed = terminal.draw(|frame| renderer::draw(frame, &screen, api_base_url))?;
        let (width, height) = renderer::lyrics_viewport(completed.area);
        screen.set_viewport(width, height);

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => match screen.handle_key(key) {
                        Action::Quit => break,
                        Action::Search(raw) => match controller.validate_and_dispatch(&raw) {
                            Dispatch::Busy => debug!("Search ignored, lookup in flight"),
                            Dispatch::Closed => break,
                            Dispatch::Rejected(_) | Dispatch::Started(_) => {}
                        },
                        Action::None => {}
                    },
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
            Some(update) = updates.recv() => {
                screen.apply(update);
            }
            _ = tick.tick() => {
                screen.expire_prompt();
            }
        }
    }

    Ok(())
}
