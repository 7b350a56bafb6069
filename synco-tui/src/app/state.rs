#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Tasks,
    AddTask,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionStatus {
    SignedIn,
    SignedOut,
}

/// A text input with mid-string cursor support.
///
/// `selected` marks the whole value as selected: the next typed character
/// replaces it and a backspace clears it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
    pub selected: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
            selected: false,
        }
    }

    /// Input primed with `s`, cursor at the end and everything selected.
    pub fn selected(s: &str) -> Self {
        Self {
            selected: true,
            ..Self::from_str(s)
        }
    }

    fn take_selection(&mut self) -> bool {
        if self.selected {
            self.selected = false;
            self.clear();
            true
        } else {
            false
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.take_selection();
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.take_selection() || self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    /// Move cursor one char to the left.
    pub fn move_left(&mut self) {
        self.selected = false;
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    /// Move cursor one char to the right.
    pub fn move_right(&mut self) {
        self.selected = false;
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.selected = false;
        self.cursor = 0;
    }
    pub fn end(&mut self) {
        self.selected = false;
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.selected = false;
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        debug_assert!(pos > 0, "prev_boundary called with pos == 0");
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }
    fn next_boundary(&self, pos: usize) -> usize {
        debug_assert!(
            pos < self.value.len(),
            "next_boundary called at end of string"
        );
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_replaces_selection() {
        let mut input = TextInput::selected("buy milk");
        input.insert('x');
        assert_eq!(input.value, "x");
        assert_eq!(input.cursor, 1);
        assert!(!input.selected);
    }

    #[test]
    fn backspace_on_selection_clears_everything() {
        let mut input = TextInput::selected("buy milk");
        input.backspace();
        assert_eq!(input.value, "");
        input.backspace();
        assert_eq!(input.value, "");
    }

    #[test]
    fn moving_cursor_keeps_text_and_drops_selection() {
        let mut input = TextInput::selected("buy milk");
        input.home();
        input.insert('>');
        assert_eq!(input.value, ">buy milk");
    }

    #[test]
    fn multibyte_edits_stay_on_char_boundaries() {
        let mut input = TextInput::from_str("kö");
        input.move_left();
        input.insert('a');
        assert_eq!(input.value, "kaö");
        input.end();
        input.backspace();
        assert_eq!(input.split_at_cursor(), ("ka", ""));
    }
}
