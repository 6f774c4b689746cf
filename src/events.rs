use anyhow::Result;
use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::error;

/// All events flowing through the host application
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input, presses and releases alike
    KeyInput(KeyEvent),

    MouseInput(MouseEvent),

    /// Bracketed paste from the terminal
    Paste(Arc<str>),

    /// The terminal window gained or lost focus
    FocusGained,
    FocusLost,

    /// Emitted by the editor's on_value callback
    ValueCommitted {
        text: Arc<str>,
    },

    StatusMessage {
        message: Arc<str>,
    },

    Quit,
}

impl AppEvent {
    /// Routing key used by subscribers
    pub fn event_type(&self) -> &'static str {
        match self {
            AppEvent::KeyInput(_) => "key_input",
            AppEvent::MouseInput(_) => "mouse_input",
            AppEvent::Paste(_) => "paste",
            AppEvent::FocusGained => "focus_gained",
            AppEvent::FocusLost => "focus_lost",
            AppEvent::ValueCommitted { .. } => "value_committed",
            AppEvent::StatusMessage { .. } => "status_message",
            AppEvent::Quit => "quit",
        }
    }
}

pub type AsyncEventHandler = Arc<
    dyn Fn(AppEvent) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + Send>>
        + Send
        + Sync,
>;

/// Event bus for publishing and subscribing to events.
///
/// A single consumer drains the channel, so handlers run one event at a time
/// in publish order.
#[derive(Clone)]
pub struct EventBus {
    async_handlers: Arc<RwLock<HashMap<String, Vec<AsyncEventHandler>>>>,
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: Arc<RwLock<Option<mpsc::UnboundedReceiver<AppEvent>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            async_handlers: Arc::new(RwLock::new(HashMap::new())),
            sender,
            receiver: Arc::new(RwLock::new(Some(receiver))),
        }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.sender.clone()
    }

    pub async fn subscribe_async<F, Fut>(&self, event_type: &str, handler: F)
    where
        F: Fn(AppEvent) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        let mut async_handlers = self.async_handlers.write().await;
        async_handlers
            .entry(event_type.to_string())
            .or_default()
            .push(Arc::new(move |event| Box::pin(handler(event))));
    }

    pub fn publish(&self, event: AppEvent) -> Result<()> {
        self.sender.send(event)?;
        Ok(())
    }

    /// Drain the channel forever. Call once, from a background task.
    pub async fn start_processing(&self) -> Result<()> {
        let mut receiver = {
            let mut receiver_guard = self.receiver.write().await;
            receiver_guard
                .take()
                .ok_or_else(|| anyhow::anyhow!("Event processor already started"))?
        };

        while let Some(event) = receiver.recv().await {
            self.handle_event(event).await;
        }

        Ok(())
    }

    /// Handle everything queued right now, including events those handlers
    /// publish. Returns how many events were handled.
    pub async fn process_pending(&self) -> Result<usize> {
        let mut receiver_guard = self.receiver.write().await;
        let receiver = receiver_guard
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("Event processor already started"))?;

        let mut handled = 0;
        while let Ok(event) = receiver.try_recv() {
            self.handle_event(event).await;
            handled += 1;
        }

        Ok(handled)
    }

    async fn handle_event(&self, event: AppEvent) {
        let event_type = event.event_type();

        let async_handlers = self.async_handlers.read().await;
        if let Some(event_handlers) = async_handlers.get(event_type) {
            for handler in event_handlers {
                if let Err(e) = handler(event.clone()).await {
                    error!(event_type, error = %e, "event handler failed");
                }
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
