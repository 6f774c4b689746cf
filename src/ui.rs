use crate::widgets::cursor::CursorSupport;
use crate::widgets::{Cursor, ToastWidget, ValueField, VALUE_FIELD_CONTEXT};
use crate::App;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub const LABEL: &str = "Value: ";
pub const LABEL_WIDTH: u16 = LABEL.len() as u16;
const MAX_FIELD_WIDTH: u16 = 48;

impl App {
    pub fn render(&mut self, f: &mut Frame) {
        let status_height = if self.config.ui.show_status_bar { 1 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),             // title
                Constraint::Length(1),             // spacer
                Constraint::Length(1),             // value row
                Constraint::Length(1),             // spacer
                Constraint::Length(1),             // help
                Constraint::Min(0),                // fill
                Constraint::Length(status_height), // status bar
            ])
            .split(f.area());

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " inline-edit ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Rgb(0, 100, 200))
                    .add_modifier(Modifier::BOLD),
            ))),
            chunks[0],
        );

        self.render_value_row(f, chunks[2]);
        self.render_help(f, chunks[4]);

        if self.config.ui.show_status_bar {
            self.update_status_bar();
            f.render_widget(self.status_bar.clone(), chunks[6]);
        }

        self.toast_manager.update();
        if self.toast_manager.has_active_toasts() {
            f.render_widget(ToastWidget::new(&self.toast_manager), f.area());
        }

        self.render_active_cursor(f);
    }

    /// Label plus either the mounted field or the committed value
    fn render_value_row(&mut self, f: &mut Frame, area: Rect) {
        let [label_area, field_area] = Layout::horizontal([
            Constraint::Length(LABEL_WIDTH),
            Constraint::Max(MAX_FIELD_WIDTH),
        ])
        .areas(area);

        f.render_widget(
            Paragraph::new(Span::styled(LABEL, Style::default().fg(Color::Cyan))),
            label_area,
        );
        self.field_area = Some(field_area);

        match &self.editor {
            Some(editor) => {
                let field = ValueField::new(editor).focused(self.editor_focused);
                let cursor = field.cursor_position(field_area);
                f.render_widget(field, field_area);

                if self.editor_focused {
                    self.cursor_manager.set_active_context(VALUE_FIELD_CONTEXT);
                    self.cursor_manager
                        .update_cursor_position(VALUE_FIELD_CONTEXT, cursor.x, cursor.y);
                } else {
                    self.cursor_manager.hide_cursor(VALUE_FIELD_CONTEXT);
                }
            }
            None => {
                let shown = if self.value.is_empty() {
                    Span::styled("(empty)", Style::default().fg(Color::DarkGray))
                } else {
                    Span::styled(
                        self.value.as_str(),
                        Style::default().add_modifier(Modifier::UNDERLINED),
                    )
                };
                f.render_widget(Paragraph::new(shown), field_area);
            }
        }
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help = if self.is_editing() {
            "Enter: commit   Tab/Esc/click away: blur   Ctrl+Q: quit"
        } else {
            "Enter/e/click: edit   q: quit"
        };
        f.render_widget(
            Paragraph::new(Span::styled(help, Style::default().fg(Color::Gray))),
            area,
        );
    }

    fn render_active_cursor(&mut self, f: &mut Frame) {
        let Some(context) = self.cursor_manager.get_active_context().map(str::to_string) else {
            return;
        };

        if let Some(position) = self.cursor_manager.get_cursor_position(&context) {
            let area = f.area();
            if let Some(state) = self.cursor_manager.get_cursor_state_mut(&context) {
                f.render_stateful_widget(Cursor::new(position), area, state);
            }
        }
    }
}
