//! Application state handlers that respond to events
use crate::editor::{EditorError, OnValue};
use crate::events::{AppEvent, EventBus};
use crate::field::FieldChange;
use crate::widgets::ToastType;
use crate::App;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const EDITING_HINT: &str = "Enter or leaving the field commits";

/// The caller side of the editor contract: commits become `ValueCommitted` events
pub fn on_value_callback(sender: mpsc::UnboundedSender<AppEvent>) -> OnValue {
    Arc::new(move |text: String| {
        if let Err(e) = sender.send(AppEvent::ValueCommitted { text: text.into() }) {
            warn!(error = %e, "dropping committed value, event bus closed");
        }
    })
}

/// Mount an editor over the current value, or refocus the one still mounted.
///
/// Runs inside the handler that saw the triggering input, so input queued
/// behind it already reaches the focused field.
pub fn focus_editor(app: &mut App, sender: &mpsc::UnboundedSender<AppEvent>) {
    if app.mount_editor(on_value_callback(sender.clone())) {
        debug!(value = %app.value, "mounted editor");
    }
    app.set_status_message(EDITING_HINT);
}

/// Surface a failed commit on the status bar and hand the error back to the bus
pub fn editor_failure(sender: &mpsc::UnboundedSender<AppEvent>, e: EditorError) -> anyhow::Error {
    let message = format!("Error: {}", e);
    if let Err(send_err) = sender.send(AppEvent::StatusMessage { message: message.into() }) {
        warn!(error = %send_err, "could not report editor error");
    }
    e.into()
}

/// Reacts to commits coming back from the editor and to app-level events
#[derive(Clone)]
pub struct AppStateHandler {
    app_state: Arc<RwLock<App>>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl AppStateHandler {
    pub fn new(app_state: Arc<RwLock<App>>, event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            app_state,
            event_sender,
        }
    }

    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        for event_type in [
            "focus_lost",
            "value_committed",
            "paste",
            "status_message",
            "quit",
        ] {
            let handler = self.clone();
            event_bus
                .subscribe_async(event_type, move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_event(event).await }
                })
                .await;
        }

        Ok(())
    }

    pub async fn handle_event(&self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::FocusLost => self.handle_focus_lost().await,
            AppEvent::ValueCommitted { text } => self.handle_value_committed(&text).await,
            AppEvent::Paste(text) => self.handle_paste(&text).await,
            AppEvent::StatusMessage { message } => {
                let mut app = self.app_state.write().await;
                if message.to_lowercase().contains("error") {
                    app.toast_manager.push(message.as_ref(), ToastType::Error);
                }
                app.set_status_message(message.as_ref());
                Ok(())
            }
            AppEvent::Quit => {
                self.app_state.write().await.running = false;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    async fn handle_focus_lost(&self) -> Result<()> {
        let mut app = self.app_state.write().await;
        app.blur_editor()
            .map_err(|e| editor_failure(&self.event_sender, e))
    }

    async fn handle_value_committed(&self, text: &str) -> Result<()> {
        let mut app = self.app_state.write().await;
        info!(text, previous = %app.value, "value committed");
        app.apply_commit(text);
        Ok(())
    }

    async fn handle_paste(&self, text: &str) -> Result<()> {
        let mut app = self.app_state.write().await;
        if !app.is_editing() {
            return Ok(());
        }
        if let Some(editor) = app.editor.as_mut() {
            editor.on_input(FieldChange::InsertStr(text.to_string()));
        }
        app.update_status_bar();
        Ok(())
    }
}
