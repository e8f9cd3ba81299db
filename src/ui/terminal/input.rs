//! Single-line text input for the search query

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

/// Editable line with a cursor. The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    value: String,
    placeholder: String,
    cursor_position: usize,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn value<S: Into<String>>(mut self, value: S) -> Self {
        self.value = value.into();
        self.cursor_position = self.value.chars().count();
        self
    }

    pub fn placeholder<S: Into<String>>(mut self, placeholder: S) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }

    #[cfg(test)]
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn len_chars(&self) -> usize {
        self.value.chars().count()
    }

    fn insert_char(&mut self, c: char) {
        let index = self.byte_index(self.cursor_position);
        self.value.insert(index, c);
        self.cursor_position += 1;
    }

    fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let index = self.byte_index(self.cursor_position);
            self.value.remove(index);
        }
    }

    fn delete_char_forward(&mut self) {
        if self.cursor_position < self.len_chars() {
            let index = self.byte_index(self.cursor_position);
            self.value.remove(index);
        }
    }

    /// Apply an editing key. Returns false when the key is not an edit.
    pub fn handle_input(&mut self, event: &KeyEvent) -> bool {
        match (event.code, event.modifiers) {
            (KeyCode::Char('a'), KeyModifiers::CONTROL) | (KeyCode::Home, _) => {
                self.cursor_position = 0;
                true
            }
            (KeyCode::Char('e'), KeyModifiers::CONTROL) | (KeyCode::End, _) => {
                self.cursor_position = self.len_chars();
                true
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                self.insert_char(c);
                true
            }
            (KeyCode::Backspace, _) => {
                self.delete_char();
                true
            }
            (KeyCode::Delete, _) => {
                self.delete_char_forward();
                true
            }
            (KeyCode::Left, _) => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                true
            }
            (KeyCode::Right, _) => {
                self.cursor_position = (self.cursor_position + 1).min(self.len_chars());
                true
            }
            _ => false,
        }
    }

    /// Display width of the text before the cursor, for placing the terminal cursor
    pub fn cursor_offset(&self) -> u16 {
        use unicode_width::UnicodeWidthStr;
        let before = &self.value[..self.byte_index(self.cursor_position)];
        before.width() as u16
    }

    pub fn line(&self, style: Style, placeholder_style: Style) -> Line<'_> {
        if self.value.is_empty() {
            Line::from(Span::styled(self.placeholder.as_str(), placeholder_style))
        } else {
            Line::from(Span::styled(self.value.as_str(), style))
        }
    }

    pub fn disabled_line(&self, style: Style) -> Line<'_> {
        Line::from(Span::styled(self.value.as_str(), style.add_modifier(Modifier::DIM)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing() {
        let mut input = InputField::new();
        assert!(input.handle_input(&key(KeyCode::Char('h'))));
        assert!(input.handle_input(&KeyEvent::new(KeyCode::Char('I'), KeyModifiers::SHIFT)));
        assert_eq!(input.get_value(), "hI");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = InputField::new().value("hello");
        assert!(input.handle_input(&key(KeyCode::Backspace)));
        assert_eq!(input.get_value(), "hell");

        input.handle_input(&key(KeyCode::Home));
        assert!(input.handle_input(&key(KeyCode::Delete)));
        assert_eq!(input.get_value(), "ell");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputField::new().value("Beyoncé");
        input.handle_input(&key(KeyCode::Left));
        input.handle_input(&key(KeyCode::Char('x')));
        assert_eq!(input.get_value(), "Beyoncxé");
        input.handle_input(&key(KeyCode::End));
        input.handle_input(&key(KeyCode::Backspace));
        assert_eq!(input.get_value(), "Beyoncx");
    }

    #[test]
    fn test_navigation_bounds() {
        let mut input = InputField::new().value("ab");
        input.handle_input(&key(KeyCode::Right));
        assert_eq!(input.cursor_position(), 2);
        input.handle_input(&key(KeyCode::Home));
        input.handle_input(&key(KeyCode::Left));
        assert_eq!(input.cursor_position(), 0);
        assert_eq!(input.cursor_offset(), 0);
    }

    #[test]
    fn test_clear_with_ctrl_u() {
        let mut input = InputField::new().value("Adele - Hello");
        assert!(input.handle_input(&KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert_eq!(input.get_value(), "");
        assert_eq!(input.cursor_position(), 0);
    }

    #[test]
    fn test_enter_is_not_an_edit() {
        let mut input = InputField::new();
        assert!(!input.handle_input(&key(KeyCode::Enter)));
    }
}
