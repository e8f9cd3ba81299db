//! Display state pushed from the lookup controller to the screen

use tokio::sync::mpsc;
use tracing::debug;

use crate::core::result::LyricsResult;

pub const LOADING_TEXT: &str = "Loading...";

/// What the output area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// Before the first search
    Idle,
    Loading,
    Finished(LyricsResult),
}

/// Everything the screen needs to render after a controller update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub display: DisplayState,
    /// False only while a lookup is in flight
    pub input_enabled: bool,
}

impl UiState {
    pub fn idle() -> Self {
        Self {
            display: DisplayState::Idle,
            input_enabled: true,
        }
    }

    pub fn loading() -> Self {
        Self {
            display: DisplayState::Loading,
            input_enabled: false,
        }
    }

    pub fn finished(result: LyricsResult) -> Self {
        Self {
            display: DisplayState::Finished(result),
            input_enabled: true,
        }
    }

    pub fn text(&self) -> String {
        match &self.display {
            DisplayState::Idle => String::new(),
            DisplayState::Loading => LOADING_TEXT.to_string(),
            DisplayState::Finished(result) => result.display_text(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.display, DisplayState::Loading)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Updates flowing from the controller to the UI loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Render(UiState),
    /// Transient notice, not written into the output area
    Prompt(String),
}

/// Receiving side of controller updates. Implementations must not block:
/// they are called from the lookup task.
pub trait DisplaySink: Send + Sync {
    fn render(&self, state: UiState);
    fn prompt(&self, message: &str);
}

/// Forwards updates to the UI loop, which owns all display state
#[derive(Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<UiEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    fn send(&self, event: UiEvent) {
        if self.sender.send(event).is_err() {
            debug!("UI loop has gone away, dropping display update");
        }
    }
}

impl DisplaySink for ChannelSink {
    fn render(&self, state: UiState) {
        self.send(UiEvent::Render(state));
    }

    fn prompt(&self, message: &str) {
        self.send(UiEvent::Prompt(message.to_string()));
    }
}
