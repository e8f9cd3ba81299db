//! Screen state for the interactive search view
//!
//! Holds everything the renderer draws. It is only mutated on the UI loop:
//! key presses and controller updates both arrive there.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::input::InputField;
use crate::core::state::{UiEvent, UiState};

/// How long a transient prompt stays on screen
const PROMPT_DURATION: Duration = Duration::from_secs(2);

/// What the UI loop should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Search(String),
    Quit,
}

#[derive(Debug, Clone)]
struct Prompt {
    message: String,
    shown_at: Instant,
}

pub struct SearchScreen {
    pub input: InputField,
    pub state: UiState,
    /// First visible line of the output area
    pub scroll: u16,
    /// Inner width and height of the output area, known after the first draw
    viewport: Option<(u16, u16)>,
    prompt: Option<Prompt>,
}

impl SearchScreen {
    pub fn new() -> Self {
        Self {
            input: InputField::new().placeholder("Song title, URL or \"Artist - Title\""),
            state: UiState::idle(),
            scroll: 0,
            viewport: None,
            prompt: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => Action::Quit,
            (KeyCode::Enter, _) => {
                // Trigger is disabled while a lookup is in flight
                if self.state.input_enabled {
                    Action::Search(self.input.get_value().to_string())
                } else {
                    Action::None
                }
            }
            (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            (KeyCode::Down, _) => {
                self.scroll_down(1);
                Action::None
            }
            (KeyCode::PageUp, _) => {
                self.scroll = self.scroll.saturating_sub(10);
                Action::None
            }
            (KeyCode::PageDown, _) => {
                self.scroll_down(10);
                Action::None
            }
            _ => {
                if self.state.input_enabled {
                    self.input.handle_input(&key);
                }
                Action::None
            }
        }
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Some((width, height));
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Last scroll offset that still has output on screen
    fn max_scroll(&self) -> u16 {
        let text = self.state.text();
        let (total, height) = match self.viewport {
            Some((width, height)) => (wrapped_line_count(&text, width), height as usize),
            None => (text.lines().count(), 1),
        };
        total.saturating_sub(height).min(u16::MAX as usize) as u16
    }

    fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Render(state) => {
                self.state = state;
                self.scroll = 0;
            }
            UiEvent::Prompt(message) => {
                self.prompt = Some(Prompt {
                    message,
                    shown_at: Instant::now(),
                });
            }
        }
    }

    /// Prompt text if it has not expired yet
    pub fn prompt(&self) -> Option<&str> {
        self.prompt
            .as_ref()
            .filter(|p| p.shown_at.elapsed() < PROMPT_DURATION)
            .map(|p| p.message.as_str())
    }

    /// Drop the prompt once it has been shown long enough
    pub fn expire_prompt(&mut self) {
        if self.prompt().is_none() {
            self.prompt = None;
        }
    }
}

/// Rows `text` takes when word-wrapped to `width` columns
fn wrapped_line_count(text: &str, width: u16) -> usize {
    use unicode_width::UnicodeWidthStr;

    let width = width.max(1) as usize;
    text.lines()
        .map(|line| {
            let mut rows = 1;
            let mut current = 0;
            for word in line.split(' ') {
                let word_width = word.width();
                let needed = if current == 0 { word_width } else { current + 1 + word_width };
                if needed <= width {
                    current = needed;
                } else {
                    if current > 0 {
                        rows += 1;
                    }
                    // Words longer than a row are broken across rows
                    let spans = word_width.max(1).div_ceil(width);
                    rows += spans - 1;
                    current = word_width - (spans - 1) * width;
                }
            }
            rows
        })
        .sum()
}

impl Default for SearchScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::result::LyricsResult;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut SearchScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_enter_triggers_search_with_raw_input() {
        let mut screen = SearchScreen::new();
        type_text(&mut screen, " Adele - Hello");
        assert_eq!(
            screen.handle_key(key(KeyCode::Enter)),
            Action::Search(" Adele - Hello".to_string())
        );
    }

    #[test]
    fn test_trigger_and_input_disabled_while_loading() {
        let mut screen = SearchScreen::new();
        type_text(&mut screen, "Hello");
        screen.apply(UiEvent::Render(UiState::loading()));

        assert_eq!(screen.handle_key(key(KeyCode::Enter)), Action::None);
        type_text(&mut screen, "!");
        assert_eq!(screen.input.get_value(), "Hello");

        screen.apply(UiEvent::Render(UiState::finished(LyricsResult::Empty)));
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), Action::Search("Hello".to_string()));
    }

    #[test]
    fn test_quit_keys() {
        let mut screen = SearchScreen::new();
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(
            screen.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_prompt_is_transient_and_separate_from_output() {
        let mut screen = SearchScreen::new();
        screen.apply(UiEvent::Prompt("Please enter a song title or URL".to_string()));

        assert_eq!(screen.prompt(), Some("Please enter a song title or URL"));
        assert_eq!(screen.state.text(), "");
        screen.expire_prompt();
        assert_eq!(screen.prompt(), Some("Please enter a song title or URL"));
    }

    fn lyrics(lines: usize) -> UiEvent {
        let text = (1..=lines).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        UiEvent::Render(UiState::finished(LyricsResult::Success { lyrics: text }))
    }

    #[test]
    fn test_scroll_stops_at_end_of_output() {
        let mut screen = SearchScreen::new();
        screen.apply(lyrics(5));
        screen.set_viewport(20, 3);

        screen.handle_key(key(KeyCode::PageDown));
        assert_eq!(screen.scroll, 2);
        screen.handle_key(key(KeyCode::Down));
        assert_eq!(screen.scroll, 2);
        screen.handle_key(key(KeyCode::Up));
        assert_eq!(screen.scroll, 1);
    }

    #[test]
    fn test_short_output_does_not_scroll() {
        let mut screen = SearchScreen::new();
        screen.apply(UiEvent::Render(UiState::finished(LyricsResult::Empty)));
        screen.set_viewport(40, 10);

        screen.handle_key(key(KeyCode::PageDown));
        assert_eq!(screen.scroll, 0);
    }

    #[test]
    fn test_wrapped_line_count() {
        assert_eq!(wrapped_line_count("", 10), 0);
        assert_eq!(wrapped_line_count("short", 10), 1);
        assert_eq!(wrapped_line_count("hello there world", 11), 2);
        assert_eq!(wrapped_line_count("abcdefghijklmnopqrstuvwxy", 10), 3);
        assert_eq!(wrapped_line_count("a\n\nb", 10), 3);
    }

    #[test]
    fn test_new_result_resets_scroll() {
        let mut screen = SearchScreen::new();
        screen.apply(lyrics(30));
        screen.set_viewport(20, 5);
        screen.handle_key(key(KeyCode::PageDown));
        assert_eq!(screen.scroll, 10);
        screen.apply(UiEvent::Render(UiState::finished(LyricsResult::Empty)));
        assert_eq!(screen.scroll, 0);
    }
}
