use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use unicode_width::UnicodeWidthChar;

use crate::editor::{EditorPhase, InlineValueEditor};
use crate::widgets::cursor::CursorSupport;

pub const VALUE_FIELD_CONTEXT: &str = "value_field";

/// Terminal columns taken by `c`; control chars take none
fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Renders a mounted inline editor as a single-line input
pub struct ValueField<'a> {
    pub editor: &'a InlineValueEditor,
    pub focused: bool,
}

impl<'a> ValueField<'a> {
    pub fn new(editor: &'a InlineValueEditor) -> Self {
        Self {
            editor,
            focused: true,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// First visible char so that the cursor cell stays inside `width` columns.
    /// Wide characters take two columns.
    pub fn scroll_offset(&self, width: u16) -> usize {
        let chars: Vec<char> = self.editor.text().chars().collect();
        let cursor = self.editor.field().cursor();

        // The cursor cell is the char under it, or one column past the end
        let cursor_cell = chars.get(cursor).map_or(1, |c| char_width(*c).max(1));
        let mut budget = (width as usize).saturating_sub(cursor_cell);
        let mut offset = cursor;
        while offset > 0 {
            let w = char_width(chars[offset - 1]);
            if w > budget {
                break;
            }
            budget -= w;
            offset -= 1;
        }
        offset
    }

    /// Map a screen column inside `area` to a char index of the field
    pub fn column_at(&self, area: Rect, x: u16) -> usize {
        let relative = x.saturating_sub(area.x) as usize;
        let offset = self.scroll_offset(area.width);

        let mut col = 0;
        for (index, c) in self.editor.text().chars().enumerate().skip(offset) {
            let w = char_width(c);
            if relative < col + w {
                return index;
            }
            col += w;
        }
        self.editor.field().len_chars()
    }

    fn field_style(&self) -> Style {
        match (self.focused, self.editor.phase()) {
            (true, EditorPhase::Editing) => Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50)),
            (true, EditorPhase::Committed) => Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(20, 60, 30))
                .add_modifier(Modifier::BOLD),
            (false, _) => Style::default().fg(Color::Gray).bg(Color::DarkGray),
        }
    }
}

impl Widget for ValueField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let style = self.field_style();
        let offset = self.scroll_offset(area.width);

        let available = area.width as usize;
        let mut used = 0;
        let visible: String = self
            .editor
            .text()
            .chars()
            .skip(offset)
            .take_while(|c| {
                let w = char_width(*c);
                if used + w > available {
                    return false;
                }
                used += w;
                true
            })
            .collect();

        // Pad so the whole field row carries the background
        let padding = available.saturating_sub(used);
        let line = Line::from(vec![
            Span::styled(visible, style),
            Span::styled(" ".repeat(padding), style),
        ]);

        let row = Rect {
            height: 1,
            ..area
        };
        Paragraph::new(line).render(row, buf);
    }
}

impl CursorSupport for ValueField<'_> {
    fn cursor_position(&self, area: Rect) -> Position {
        let offset = self.scroll_offset(area.width);
        let cursor = self.editor.field().cursor();
        let col: usize = self
            .editor
            .text()
            .chars()
            .skip(offset)
            .take(cursor.saturating_sub(offset))
            .map(char_width)
            .sum();
        let col = col.min(area.width.saturating_sub(1) as usize) as u16;
        Position::new(area.x + col, area.y)
    }

    fn cursor_context(&self) -> &str {
        VALUE_FIELD_CONTEXT
    }
}
