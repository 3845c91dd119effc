use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Longer answers than this are never right; stop accepting keystrokes.
pub const MAX_ANSWER_CHARS: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    /// Cursor moved or the key was ignored.
    Continue,
    /// Text was edited.
    Changed,
    Submit,
    Hint,
    Cancel,
}

/// Single-line answer field with readline-style editing.
#[derive(Clone, Debug, Default)]
pub struct LineInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
}

impl LineInput {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled rendering.
    /// When cursor is at end of text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.cursor);
        match self.text[byte_offset..].chars().next() {
            Some(ch) => {
                let next_byte = byte_offset + ch.len_utf8();
                (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
            }
            None => (&self.text, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => InputResult::Cancel,
            KeyCode::Enter => InputResult::Submit,
            KeyCode::Tab => InputResult::Hint,
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InputResult::Continue
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.len());
                InputResult::Continue
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputResult::Continue
            }
            KeyCode::End => {
                self.cursor = self.len();
                InputResult::Continue
            }
            KeyCode::Char('a') if ctrl => {
                self.cursor = 0;
                InputResult::Continue
            }
            KeyCode::Char('e') if ctrl => {
                self.cursor = self.len();
                InputResult::Continue
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.remove_at(self.cursor - 1);
                self.cursor -= 1;
                InputResult::Changed
            }
            KeyCode::Delete if self.cursor < self.len() => {
                self.remove_at(self.cursor);
                InputResult::Changed
            }
            KeyCode::Char('u') if ctrl => {
                self.clear();
                InputResult::Changed
            }
            KeyCode::Char('w') if ctrl => {
                if self.delete_word_back() {
                    InputResult::Changed
                } else {
                    InputResult::Continue
                }
            }
            KeyCode::Char(ch) if !ctrl && !ch.is_control() => {
                if self.len() >= MAX_ANSWER_CHARS {
                    return InputResult::Continue;
                }
                let byte_offset = self.char_to_byte(self.cursor);
                self.text.insert(byte_offset, ch);
                self.cursor += 1;
                InputResult::Changed
            }
            _ => InputResult::Continue,
        }
    }

    fn remove_at(&mut self, char_idx: usize) {
        let start = self.char_to_byte(char_idx);
        let end = self.char_to_byte(char_idx + 1);
        self.text.replace_range(start..end, "");
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    /// unix-word-rubout: skip whitespace, then non-whitespace.
    fn delete_word_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let start_byte = self.char_to_byte(pos);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
        true
    }
}
