use crate::events::{AppEvent, EventBus};
use crate::handlers::app_state::{editor_failure, focus_editor};
use crate::input::keys::{field_change_for, is_blur_key, is_quit_key, key_up_code};
use crate::App;
use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc;

/// Routes key input to the mounted editor, or to view-mode shortcuts
#[derive(Clone)]
pub struct KeyboardHandler {
    app_state: Arc<RwLock<App>>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl KeyboardHandler {
    pub fn new(app_state: Arc<RwLock<App>>, event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            app_state,
            event_sender,
        }
    }

    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        let handler = self.clone();

        event_bus
            .subscribe_async("key_input", move |event| {
                let handler = handler.clone();
                async move { handler.handle_key_event(event).await }
            })
            .await;

        Ok(())
    }

    pub async fn handle_key_event(&self, event: AppEvent) -> Result<()> {
        let AppEvent::KeyInput(key) = event else {
            return Ok(());
        };

        if is_quit_key(&key) {
            self.event_sender.send(AppEvent::Quit)?;
            return Ok(());
        }

        let editing = self.app_state.read().await.is_editing();
        if editing {
            self.handle_editing_key(key).await
        } else {
            self.handle_view_key(key).await
        }
    }

    /// Keys while no editor has focus
    async fn handle_view_key(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) | (KeyCode::Char('e'), KeyModifiers::NONE) => {
                let mut app = self.app_state.write().await;
                // The release of the key that opened the field must not reach it
                app.mount_key = Some(key.code);
                focus_editor(&mut app, &self.event_sender);
            }
            (KeyCode::Char('q'), KeyModifiers::NONE) => {
                self.event_sender.send(AppEvent::Quit)?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Keys while the editor has focus: input change first, then key-up
    async fn handle_editing_key(&self, key: KeyEvent) -> Result<()> {
        let mut app = self.app_state.write().await;

        // Blur here, not through the bus, so the commit sees the text as of this key
        if is_blur_key(&key) {
            return app
                .blur_editor()
                .map_err(|e| editor_failure(&self.event_sender, e));
        }

        let synthesize = app.config.editor.synthesize_key_up;

        if app.mount_key == Some(key.code) {
            app.mount_key = None;
            if key.kind == KeyEventKind::Release {
                return Ok(());
            }
        }

        if let Some(change) = field_change_for(&key) {
            if let Some(editor) = app.editor.as_mut() {
                editor.on_input(change);
            }
            app.cursor_manager.notify_activity_for_active();
        }

        let committed = match (key_up_code(&key, synthesize), app.editor.as_mut()) {
            (Some(code), Some(editor)) => editor.on_key_up(code),
            _ => Ok(()),
        };

        app.update_status_bar();
        drop(app);

        committed.map_err(|e| editor_failure(&self.event_sender, e))
    }
}
