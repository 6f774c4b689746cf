//! # Inline Value Editor
//!
//! An editable single-line field seeded with a value. The field commits its
//! live text to the caller when it loses focus or when Enter is released.
//!
//! ## Lifecycle
//!
//! The host mounts the editor with [`EditorProps`], feeds it events while it
//! is mounted and drops it on unmount. Nothing survives between mounts.
//!
//! ```text
//!   mount ──> Editing ──commit──> Committed
//!                ^                    │
//!                └──── any edit ──────┘
//! ```
//!
//! Enter does not blur the field, so Enter followed by a blur commits twice.
//! The editor reports every commit and leaves deduplication to the caller.

pub mod error;

use std::fmt;
use std::sync::Arc;

use ratatui::crossterm::event::KeyCode;
use tracing::debug;

use crate::field::{FieldChange, TextField};

pub use error::EditorError;

/// Callback receiving the committed text
pub type OnValue = Arc<dyn Fn(String) + Send + Sync>;

/// Configuration supplied by the caller when mounting an editor
#[derive(Clone, Default)]
pub struct EditorProps {
    pub value: String,
    pub on_value: Option<OnValue>,
}

impl EditorProps {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            on_value: None,
        }
    }

    pub fn on_value<F>(mut self, callback: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.on_value = Some(Arc::new(callback));
        self
    }

    pub fn with_callback(mut self, callback: OnValue) -> Self {
        self.on_value = Some(callback);
        self
    }

    /// Build props from an arbitrary JSON value, stringifying non-strings
    pub fn from_json(value: &serde_json::Value) -> Self {
        Self::new(stringify_value(value))
    }
}

impl fmt::Debug for EditorProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorProps")
            .field("value", &self.value)
            .field("on_value", &self.on_value.is_some())
            .finish()
    }
}

/// Default stringification of a seed value.
///
/// Strings are taken verbatim, `null` becomes empty, scalars use their
/// display form, and arrays or objects are rendered as compact JSON.
pub fn stringify_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Mounted and accepting input
    Editing,
    /// The last thing that happened was a commit
    Committed,
}

/// What caused a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitTrigger {
    Enter,
    Blur,
}

/// Events the host dispatches to a mounted editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The field content or cursor changed
    Input(FieldChange),
    /// A key was released while the field had focus
    KeyUp(KeyCode),
    /// The field lost focus
    Blur,
}

pub struct InlineValueEditor {
    initial_value: String,
    field: TextField,
    on_value: Option<OnValue>,
    phase: EditorPhase,
    commit_count: usize,
}

impl InlineValueEditor {
    /// Mount an editor, seeding the field with `props.value`
    pub fn mount(props: EditorProps) -> Self {
        debug!(value = %props.value, "mounting inline editor");
        let field = TextField::with_text(&props.value);

        Self {
            initial_value: props.value,
            field,
            on_value: props.on_value,
            phase: EditorPhase::Editing,
            commit_count: 0,
        }
    }

    pub fn initial_value(&self) -> &str {
        &self.initial_value
    }

    /// The live text currently shown in the field
    pub fn text(&self) -> &str {
        self.field.text()
    }

    pub fn field(&self) -> &TextField {
        &self.field
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn commit_count(&self) -> usize {
        self.commit_count
    }

    pub fn handle_event(&mut self, event: EditorEvent) -> Result<(), EditorError> {
        match event {
            EditorEvent::Input(change) => {
                self.on_input(change);
                Ok(())
            }
            EditorEvent::KeyUp(code) => self.on_key_up(code),
            EditorEvent::Blur => self.on_blur(),
        }
    }

    /// Apply an input change to the field. Never notifies the caller.
    pub fn on_input(&mut self, change: FieldChange) {
        if change.is_edit() {
            self.phase = EditorPhase::Editing;
        }
        self.field.apply(change);
    }

    /// Enter commits; every other key is ignored
    pub fn on_key_up(&mut self, code: KeyCode) -> Result<(), EditorError> {
        if code == KeyCode::Enter {
            self.commit(CommitTrigger::Enter)
        } else {
            Ok(())
        }
    }

    pub fn on_blur(&mut self) -> Result<(), EditorError> {
        self.commit(CommitTrigger::Blur)
    }

    /// Read the live text and hand it to `on_value`
    pub fn commit(&mut self, trigger: CommitTrigger) -> Result<(), EditorError> {
        let text = self.field.text().to_string();

        let callback = self
            .on_value
            .as_ref()
            .ok_or_else(|| EditorError::MissingCallback { text: text.clone() })?;

        self.commit_count += 1;
        self.phase = EditorPhase::Committed;
        debug!(?trigger, commit = self.commit_count, text = %text, "inline editor commit");

        callback(text);
        Ok(())
    }
}

impl fmt::Debug for InlineValueEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineValueEditor")
            .field("initial_value", &self.initial_value)
            .field("field", &self.field)
            .field("phase", &self.phase)
            .field("commit_count", &self.commit_count)
            .finish()
    }
}
