//! Event handlers for the host application
pub mod app_state;
pub mod keyboard;
pub mod mouse;

pub use app_state::{editor_failure, focus_editor, on_value_callback, AppStateHandler};
pub use keyboard::KeyboardHandler;
pub use mouse::MouseHandler;
