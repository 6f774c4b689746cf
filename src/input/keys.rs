// Key translation for a mounted inline editor

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::field::{FieldChange, FieldMovement};

/// Input change produced by a key press, if any.
///
/// Releases never edit. Enter is not an input change; it only matters on
/// key-up.
pub fn field_change_for(key: &KeyEvent) -> Option<FieldChange> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let word = key.modifiers.contains(KeyModifiers::CONTROL)
        || key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Some(FieldChange::Insert(c))
        }
        KeyCode::Backspace => Some(FieldChange::Backspace),
        KeyCode::Delete => Some(FieldChange::Delete),
        KeyCode::Left if word => Some(FieldChange::Move(FieldMovement::WordLeft)),
        KeyCode::Right if word => Some(FieldChange::Move(FieldMovement::WordRight)),
        KeyCode::Left => Some(FieldChange::Move(FieldMovement::Left)),
        KeyCode::Right => Some(FieldChange::Move(FieldMovement::Right)),
        KeyCode::Home => Some(FieldChange::Move(FieldMovement::Home)),
        KeyCode::End => Some(FieldChange::Move(FieldMovement::End)),
        KeyCode::Char('a') if key.modifiers == KeyModifiers::CONTROL => {
            Some(FieldChange::Move(FieldMovement::Home))
        }
        KeyCode::Char('e') if key.modifiers == KeyModifiers::CONTROL => {
            Some(FieldChange::Move(FieldMovement::End))
        }
        _ => None,
    }
}

/// Key code to report as released for this event.
///
/// When `synthesize` is set every press or repeat is treated as followed by
/// a release, for terminals that never report one, and real releases are
/// dropped so a key is never released twice. Otherwise only real releases
/// count.
pub fn key_up_code(key: &KeyEvent, synthesize: bool) -> Option<KeyCode> {
    match (key.kind, synthesize) {
        (KeyEventKind::Release, false) => Some(key.code),
        (KeyEventKind::Press | KeyEventKind::Repeat, true) => Some(key.code),
        _ => None,
    }
}

/// Keys that move focus away from the field
pub fn is_blur_key(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release && matches!(key.code, KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc)
}

pub fn is_quit_key(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && key.code == KeyCode::Char('q')
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEventState;

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_printable_keys_insert() {
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(field_change_for(&key), Some(FieldChange::Insert('x')));

        let shifted = KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT);
        assert_eq!(field_change_for(&shifted), Some(FieldChange::Insert('X')));
    }

    #[test]
    fn test_enter_is_not_an_input_change() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(field_change_for(&key), None);
    }

    #[test]
    fn test_release_never_edits() {
        assert_eq!(field_change_for(&release(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_arrows_move_by_word() {
        let key = KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL);
        assert_eq!(
            field_change_for(&key),
            Some(FieldChange::Move(FieldMovement::WordLeft))
        );
    }

    #[test]
    fn test_key_up_code() {
        let press = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(key_up_code(&press, true), Some(KeyCode::Enter));
        assert_eq!(key_up_code(&press, false), None);
        assert_eq!(key_up_code(&release(KeyCode::Enter), false), Some(KeyCode::Enter));
        assert_eq!(key_up_code(&release(KeyCode::Enter), true), None);
    }

    #[test]
    fn test_blur_and_quit_keys() {
        assert!(is_blur_key(&KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)));
        assert!(is_blur_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!is_blur_key(&release(KeyCode::Tab)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    }
}
