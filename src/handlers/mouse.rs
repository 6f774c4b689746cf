use crate::events::{AppEvent, EventBus};
use crate::field::FieldChange;
use crate::handlers::app_state::{editor_failure, focus_editor};
use crate::input::coordinates::{screen_to_field, ClickTarget};
use crate::App;
use anyhow::Result;
use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc;

/// Clicks focus, position within, or blur the value field
#[derive(Clone)]
pub struct MouseHandler {
    app_state: Arc<RwLock<App>>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl MouseHandler {
    pub fn new(app_state: Arc<RwLock<App>>, event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            app_state,
            event_sender,
        }
    }

    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        let handler = self.clone();

        event_bus
            .subscribe_async("mouse_input", move |event| {
                let handler = handler.clone();
                async move { handler.handle_mouse_event(event).await }
            })
            .await;

        Ok(())
    }

    pub async fn handle_mouse_event(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::MouseInput(mouse) = event {
            if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                self.handle_click(mouse).await?;
            }
        }

        Ok(())
    }

    async fn handle_click(&self, mouse: MouseEvent) -> Result<()> {
        let mut app = self.app_state.write().await;
        let target = screen_to_field(&app, mouse.column, mouse.row);

        match target {
            ClickTarget::Field(column) => {
                if !app.is_editing() {
                    focus_editor(&mut app, &self.event_sender);
                    return Ok(());
                }
                if let (Some(col), Some(editor)) = (column, app.editor.as_mut()) {
                    editor.on_input(FieldChange::MoveTo(col));
                }
                app.cursor_manager.notify_activity_for_active();
            }
            ClickTarget::Outside => {
                app.blur_editor()
                    .map_err(|e| editor_failure(&self.event_sender, e))?;
            }
        }

        Ok(())
    }
}
