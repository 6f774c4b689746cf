use thiserror::Error;

/// Error surfaced by an inline editor when its caller contract is broken.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A commit was triggered on an editor mounted without an `on_value` callback.
    #[error("inline editor committed {text:?} but no on_value callback was supplied")]
    MissingCallback { text: String },
}
