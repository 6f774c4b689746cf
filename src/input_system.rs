use crate::events::{AppEvent, EventBus};
use anyhow::{Context, Result};
use ratatui::crossterm::event::{Event, KeyEvent, MouseEvent};
use tokio::sync::mpsc;
use tracing::trace;

/// Turns raw terminal input into bus events
pub struct InputSystem {
    event_bus: EventBus,
}

impl InputSystem {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }

    pub fn handle_key_input(&self, key: KeyEvent) -> Result<()> {
        self.event_bus
            .publish(AppEvent::KeyInput(key))
            .context("Failed to publish key input event")
    }

    pub fn handle_mouse_input(&self, mouse: MouseEvent) -> Result<()> {
        self.event_bus
            .publish(AppEvent::MouseInput(mouse))
            .context("Failed to publish mouse input event")
    }

    /// Publish whatever the terminal reported. Resizes are picked up by the next draw.
    pub fn handle_terminal_event(&self, event: Event) -> Result<()> {
        let app_event = match event {
            Event::Key(key) => return self.handle_key_input(key),
            Event::Mouse(mouse) => return self.handle_mouse_input(mouse),
            Event::Paste(text) => AppEvent::Paste(text.into()),
            Event::FocusGained => AppEvent::FocusGained,
            Event::FocusLost => AppEvent::FocusLost,
            Event::Resize(width, height) => {
                trace!(width, height, "terminal resized");
                return Ok(());
            }
        };

        self.event_bus
            .publish(app_event)
            .context("Failed to publish terminal event")
    }

    pub fn event_sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_bus.sender()
    }
}
