//! Inline value editor: a single-line field that commits on Enter or blur,
//! plus the terminal host that mounts it.

pub mod app;
pub mod config;
pub mod editor;
pub mod events;
pub mod field;
pub mod handlers;
pub mod input;
pub mod input_system;
pub mod logging;
pub mod ui;
pub mod widgets;

// Re-export main types for convenience
pub use app::App;
pub use editor::{EditorError, EditorEvent, EditorPhase, EditorProps, InlineValueEditor, OnValue};
pub use field::TextField;
