//! # Text Field
//!
//! Single-line text buffer backing a mounted inline editor.
//!
//! ## What it does
//!
//! - Stores the live text of the field
//! - Tracks a cursor measured in characters, not bytes
//! - Applies input changes (typing, deletion, cursor movement)
//!
//! The field never holds a newline. Pasted or replaced text is flattened
//! onto one line before it is stored.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,  // char index, 0..=len_chars
    modified: bool, // set by any edit since the field was seeded
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the field with `value`, placing the cursor after the last character.
    ///
    /// Line breaks in `value` are removed, the way a single-line text input
    /// sanitizes its value, so a multi-line seed shows and commits joined.
    pub fn with_text(value: &str) -> Self {
        let text = single_line(value);
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            modified: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn modified(&self) -> bool {
        self.modified
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' || c == '\r' {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
        self.modified = true;
    }

    pub fn insert_str(&mut self, s: &str) {
        let flat = single_line(s);
        if flat.is_empty() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert_str(at, &flat);
        self.cursor += flat.chars().count();
        self.modified = true;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        self.modified = true;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.len_chars() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        self.modified = true;
    }

    /// Replace the whole content, cursor to the end
    pub fn replace(&mut self, value: &str) {
        self.text = single_line(value);
        self.cursor = self.len_chars();
        self.modified = true;
    }

    /// Place the cursor at `col`, clamped to the text length
    pub fn set_cursor(&mut self, col: usize) {
        self.cursor = col.min(self.len_chars());
    }

    pub fn move_cursor(&mut self, movement: FieldMovement) {
        let len = self.len_chars();

        self.cursor = match movement {
            FieldMovement::Left => self.cursor.saturating_sub(1),
            FieldMovement::Right => (self.cursor + 1).min(len),
            FieldMovement::Home => 0,
            FieldMovement::End => len,
            FieldMovement::WordLeft => self.word_start_before(self.cursor),
            FieldMovement::WordRight => self.word_end_after(self.cursor),
        };
    }

    /// Byte offset of the char at `col`; `text.len()` when past the end
    fn byte_index(&self, col: usize) -> usize {
        self.text
            .char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn word_start_before(&self, col: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut i = col.min(chars.len());

        // Skip whitespace, then the word itself
        while i > 0 && chars[i - 1].is_whitespace() {
            i -= 1;
        }
        while i > 0 && !chars[i - 1].is_whitespace() {
            i -= 1;
        }
        i
    }

    fn word_end_after(&self, col: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut i = col.min(chars.len());

        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        i
    }
}

/// Cursor movements available inside a single-line field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldMovement {
    Left,
    Right,
    WordLeft,
    WordRight,
    Home,
    End,
}

/// An input-change event applied to the field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldChange {
    Insert(char),
    InsertStr(String),
    Backspace,
    Delete,
    Move(FieldMovement),
    MoveTo(usize),
    Replace(String),
}

impl FieldChange {
    /// Whether this change alters the text (as opposed to only the cursor)
    pub fn is_edit(&self) -> bool {
        !matches!(self, FieldChange::Move(_) | FieldChange::MoveTo(_))
    }
}

impl TextField {
    pub fn apply(&mut self, change: FieldChange) {
        match change {
            FieldChange::Insert(c) => self.insert_char(c),
            FieldChange::InsertStr(s) => self.insert_str(&s),
            FieldChange::Backspace => self.backspace(),
            FieldChange::Delete => self.delete(),
            FieldChange::Move(movement) => self.move_cursor(movement),
            FieldChange::MoveTo(col) => self.set_cursor(col),
            FieldChange::Replace(value) => self.replace(&value),
        }
    }
}

fn single_line(value: &str) -> String {
    value.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}
