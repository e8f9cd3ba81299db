use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::app::SearchScreen;
use crate::core::result::LyricsResult;
use crate::core::state::DisplayState;

const ACCENT: Color = Color::Rgb(255, 165, 0);
const MUTED: Color = Color::DarkGray;
const ERROR: Color = Color::Red;

fn layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area)
}

/// Inner width and height of the bordered lyrics area
pub fn lyrics_viewport(area: Rect) -> (u16, u16) {
    let output = layout(area)[3];
    (output.width.saturating_sub(2), output.height.saturating_sub(2))
}

pub fn draw(frame: &mut Frame, screen: &SearchScreen, api_base_url: &str) {
    let chunks = layout(frame.size());

    draw_header(frame, chunks[0], api_base_url);
    draw_input(frame, chunks[1], screen);
    draw_trigger(frame, chunks[2], screen);
    draw_output(frame, chunks[3], screen);
    draw_footer(frame, chunks[4], screen);
}

fn draw_header(frame: &mut Frame, area: Rect, api_base_url: &str) {
    let header = Line::from(vec![
        Span::styled(
            format!(" {} v{} ", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(api_base_url.to_string(), Style::default().fg(MUTED)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn draw_input(frame: &mut Frame, area: Rect, screen: &SearchScreen) {
    let enabled = screen.state.input_enabled;
    let border = if enabled { ACCENT } else { MUTED };

    let line = if enabled {
        screen.input.line(Style::default(), Style::default().fg(MUTED))
    } else {
        screen.input.disabled_line(Style::default())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Song ");
    frame.render_widget(Paragraph::new(line).block(block), area);

    if enabled {
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1 + screen.input.cursor_offset()).min(max_x);
        frame.set_cursor(x, area.y + 1);
    }
}

fn draw_trigger(frame: &mut Frame, area: Rect, screen: &SearchScreen) {
    let trigger = if screen.state.input_enabled {
        Span::styled(" [ Enter: Search ] ", Style::default().fg(Color::Black).bg(ACCENT))
    } else {
        Span::styled(" [ Searching... ] ", Style::default().fg(MUTED))
    };
    frame.render_widget(Paragraph::new(Line::from(trigger)), area);
}

fn draw_output(frame: &mut Frame, area: Rect, screen: &SearchScreen) {
    let style = match &screen.state.display {
        DisplayState::Finished(LyricsResult::Failure { .. }) => Style::default().fg(ERROR),
        DisplayState::Finished(LyricsResult::Empty) | DisplayState::Loading => {
            Style::default().fg(MUTED).add_modifier(Modifier::ITALIC)
        }
        _ => Style::default(),
    };

    let text = screen.state.text();
    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Lyrics "))
        .wrap(Wrap { trim: false })
        .scroll((screen.scroll, 0));
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, screen: &SearchScreen) {
    let line = match screen.prompt() {
        Some(message) => Line::from(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
        None => Line::from(Span::styled(
            " Enter search  ↑/↓ PgUp/PgDn scroll  Esc quit",
            Style::default().fg(MUTED),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{UiEvent, UiState};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(screen: &SearchScreen) -> String {
        let backend = TestBackend::new(60, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw(frame, screen, "http://127.0.0.1:10000"))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_renders_lyrics() {
        let mut screen = SearchScreen::new();
        screen.apply(UiEvent::Render(UiState::finished(LyricsResult::Success {
            lyrics: "La la la".to_string(),
        })));

        let out = rendered(&screen);
        assert!(out.contains("La la la"));
        assert!(out.contains("Enter: Search"));
    }

    #[test]
    fn test_renders_loading_with_disabled_trigger() {
        let mut screen = SearchScreen::new();
        screen.apply(UiEvent::Render(UiState::loading()));

        let out = rendered(&screen);
        assert!(out.contains("Loading..."));
        assert!(out.contains("Searching..."));
        assert!(!out.contains("Enter: Search"));
    }

    #[test]
    fn test_lyrics_viewport_excludes_borders_and_chrome() {
        assert_eq!(lyrics_viewport(Rect::new(0, 0, 60, 16)), (58, 8));
    }

    #[test]
    fn test_renders_prompt_in_footer() {
        let mut screen = SearchScreen::new();
        screen.apply(UiEvent::Prompt("Please enter a song title or URL".to_string()));

        let out = rendered(&screen);
        assert!(out.contains("Please enter a song title or URL"));
    }
}
