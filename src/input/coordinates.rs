// Hit testing against the last rendered field area

use ratatui::layout::Position;

use crate::App;
use crate::widgets::ValueField;

/// Where a click landed relative to the value row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the field; the char index under the pointer when an editor is mounted
    Field(Option<usize>),
    Outside,
}

pub fn screen_to_field(app: &App, mouse_x: u16, mouse_y: u16) -> ClickTarget {
    let Some(area) = app.field_area else {
        return ClickTarget::Outside;
    };

    if !area.contains(Position::new(mouse_x, mouse_y)) {
        return ClickTarget::Outside;
    }

    let column = app
        .editor
        .as_ref()
        .map(|editor| ValueField::new(editor).column_at(area, mouse_x));
    ClickTarget::Field(column)
}

