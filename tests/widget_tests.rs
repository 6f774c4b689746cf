//! Integration tests for the widget system
//!
//! Tests the value field, cursor manager, toasts and status bar

use inline_editor::editor::EditorProps;
use inline_editor::field::{FieldChange, FieldMovement};
use inline_editor::widgets::{
    CursorManager, CursorSupport, SlotAlignment, StatusBar, StatusSlot, ToastManager, ToastType,
    ToastWidget, ValueField, VALUE_FIELD_CONTEXT,
};
use inline_editor::InlineValueEditor;
use ratatui::{backend::TestBackend, layout::Rect, Terminal};
use std::time::Duration;

fn mounted(value: &str) -> InlineValueEditor {
    InlineValueEditor::mount(EditorProps::new(value).on_value(|_| {}))
}

/// Text of one row of the test backend's buffer
fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol().to_string())
        .collect()
}

#[test]
fn test_value_field_renders_live_text() {
    let mut editor = mounted("hello");
    editor.on_input(FieldChange::InsertStr(" world".to_string()));

    let mut terminal = Terminal::new(TestBackend::new(20, 1)).unwrap();
    terminal
        .draw(|f| f.render_widget(ValueField::new(&editor), Rect::new(0, 0, 20, 1)))
        .unwrap();

    assert!(row_text(&terminal, 0).starts_with("hello world"));
}

#[test]
fn test_value_field_scrolls_to_keep_cursor_visible() {
    let editor = mounted("abcdefghij");
    let field = ValueField::new(&editor);

    // Cursor at 10 in a 5-wide field shows the last four chars plus the cursor cell
    assert_eq!(field.scroll_offset(5), 6);

    let mut terminal = Terminal::new(TestBackend::new(5, 1)).unwrap();
    terminal
        .draw(|f| f.render_widget(ValueField::new(&editor), Rect::new(0, 0, 5, 1)))
        .unwrap();
    assert_eq!(row_text(&terminal, 0), "ghij ");
}

#[test]
fn test_value_field_cursor_position() {
    let mut editor = mounted("abc");
    let area = Rect::new(10, 4, 20, 1);

    let position = ValueField::new(&editor).cursor_position(area);
    assert_eq!((position.x, position.y), (13, 4));

    editor.on_input(FieldChange::Move(FieldMovement::Home));
    let position = ValueField::new(&editor).cursor_position(area);
    assert_eq!((position.x, position.y), (10, 4));

    assert_eq!(ValueField::new(&editor).cursor_context(), VALUE_FIELD_CONTEXT);
}

#[test]
fn test_value_field_column_at() {
    let editor = mounted("abc");
    let area = Rect::new(7, 2, 20, 1);
    let field = ValueField::new(&editor);

    assert_eq!(field.column_at(area, 7), 0);
    assert_eq!(field.column_at(area, 9), 2);
    // Past the text clamps to the end
    assert_eq!(field.column_at(area, 25), 3);
}

#[test]
fn test_value_field_measures_wide_chars_in_columns() {
    let mut editor = mounted("日本語");
    let area = Rect::new(0, 0, 20, 1);

    let position = ValueField::new(&editor).cursor_position(area);
    assert_eq!(position.x, 6);

    // Each wide char spans two columns
    let field = ValueField::new(&editor);
    assert_eq!(field.column_at(area, 0), 0);
    assert_eq!(field.column_at(area, 3), 1);
    assert_eq!(field.column_at(area, 5), 2);
    assert_eq!(field.column_at(area, 6), 3);

    editor.on_input(FieldChange::MoveTo(1));
    let position = ValueField::new(&editor).cursor_position(area);
    assert_eq!(position.x, 2);
}

#[test]
fn test_value_field_scrolls_wide_chars_without_overflow() {
    let editor = mounted("日本語");
    let area = Rect::new(0, 0, 5, 1);
    let field = ValueField::new(&editor);

    // Two wide chars plus the cursor cell fill the five columns
    assert_eq!(field.scroll_offset(5), 1);
    assert_eq!(field.cursor_position(area).x, 4);

    let mut terminal = Terminal::new(TestBackend::new(8, 1)).unwrap();
    terminal
        .draw(|f| f.render_widget(ValueField::new(&editor), area))
        .unwrap();

    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(0, 0)].symbol(), "本");
    assert_eq!(buffer[(2, 0)].symbol(), "語");
    // Nothing is drawn past the field
    assert_eq!(buffer[(5, 0)].symbol(), " ");
    assert_eq!(buffer[(5, 0)].bg, ratatui::style::Color::Reset);
}

#[test]
fn test_value_field_zero_area_does_not_panic() {
    let editor = mounted("abc");
    let mut terminal = Terminal::new(TestBackend::new(10, 2)).unwrap();
    terminal
        .draw(|f| f.render_widget(ValueField::new(&editor), Rect::new(0, 0, 0, 0)))
        .unwrap();
}

#[test]
fn test_cursor_manager_context_switching() {
    let mut cursor_manager = CursorManager::new();
    assert_eq!(cursor_manager.get_active_context(), None);

    cursor_manager.set_active_context(VALUE_FIELD_CONTEXT);
    assert_eq!(cursor_manager.get_active_context(), Some(VALUE_FIELD_CONTEXT));

    cursor_manager.update_cursor_position(VALUE_FIELD_CONTEXT, 10, 5);
    let position = cursor_manager.get_cursor_position(VALUE_FIELD_CONTEXT).unwrap();
    assert_eq!((position.x, position.y), (10, 5));

    cursor_manager.hide_cursor(VALUE_FIELD_CONTEXT);
    assert_eq!(cursor_manager.get_active_context(), None);
    assert!(cursor_manager.get_cursor_position(VALUE_FIELD_CONTEXT).is_none());
}

#[test]
fn test_cursor_manager_ignores_inactive_updates() {
    let mut cursor_manager = CursorManager::new();
    cursor_manager.update_cursor_position("other", 3, 3);
    assert!(cursor_manager.get_cursor_position("other").is_none());
}

#[test]
fn test_toast_manager_keeps_newest() {
    let mut toast_manager = ToastManager::new();
    assert!(!toast_manager.has_active_toasts());

    for i in 0..5 {
        toast_manager.push(format!("toast {}", i), ToastType::Info);
    }

    let messages: Vec<&str> = toast_manager
        .toasts()
        .iter()
        .map(|t| t.message.as_str())
        .collect();
    assert_eq!(messages, vec!["toast 2", "toast 3", "toast 4"]);
}

#[test]
fn test_toast_manager_expiry() {
    let mut toast_manager = ToastManager::new().with_duration(Duration::ZERO);
    toast_manager.push("gone", ToastType::Success);

    std::thread::sleep(Duration::from_millis(5));
    toast_manager.update();
    assert!(!toast_manager.has_active_toasts());
}

#[test]
fn test_disabled_toast_manager_drops_toasts() {
    let mut toast_manager = ToastManager::new().enabled(false);
    toast_manager.push("ignored", ToastType::Error);
    assert!(!toast_manager.has_active_toasts());
}

#[test]
fn test_toast_rendering() {
    let mut toast_manager = ToastManager::new();
    toast_manager.push("Committed \"x\"", ToastType::Success);

    let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
    terminal
        .draw(|f| f.render_widget(ToastWidget::new(&toast_manager), f.area()))
        .unwrap();

    let rendered: String = (0..10).map(|y| row_text(&terminal, y)).collect();
    assert!(rendered.contains("Committed"));
}

#[test]
fn test_status_bar_rendering() {
    let mut status_bar = StatusBar::new();
    status_bar.set_slot(StatusSlot::new("mode", "EDITING").with_priority(100));
    status_bar.set_slot(
        StatusSlot::new("commits", "Commits: 2").with_alignment(SlotAlignment::Right),
    );

    let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
    terminal
        .draw(|f| f.render_widget(status_bar.clone(), f.area()))
        .unwrap();

    let row = row_text(&terminal, 0);
    assert!(row.starts_with(" EDITING "));
    assert!(row.trim_end().ends_with("Commits: 2"));
}
