use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::event::{self, KeyCode},
    layout::Rect,
    Terminal,
};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::config::{Config, ConfigManager};
use crate::editor::{EditorError, EditorProps, InlineValueEditor, OnValue};
use crate::events::EventBus;
use crate::handlers::{AppStateHandler, KeyboardHandler, MouseHandler};
use crate::input_system::InputSystem;
use crate::widgets::{CursorManager, StatusBar, ToastManager, ToastType};

/// Host state shared by every handler
pub struct App {
    pub running: bool,

    /// The committed value shown while no editor is mounted
    pub value: String,

    /// Mounted inline editor, if any
    pub editor: Option<InlineValueEditor>,

    /// Whether the mounted editor has keyboard focus
    pub editor_focused: bool,

    /// Key that mounted or refocused the editor, until it is seen again
    pub mount_key: Option<KeyCode>,

    /// Where the value row was drawn last frame, for hit testing
    pub field_area: Option<Rect>,

    /// Number of commits received from mounted editors
    pub commits: usize,

    pub status_message: Option<String>,

    /// Directory holding config and log files
    pub user_dir: PathBuf,

    pub config: Config,

    pub toast_manager: ToastManager,

    pub cursor_manager: CursorManager,

    pub status_bar: StatusBar,
}

impl App {
    /// Create the app, loading config from the user directory
    pub async fn new(initial_value: impl Into<String>) -> Self {
        let user_dir = default_user_dir();

        if !user_dir.exists() {
            if let Err(e) = tokio::fs::create_dir_all(&user_dir).await {
                warn!(error = %e, dir = %user_dir.display(), "could not create user directory");
            }
        }

        let mut config_manager = ConfigManager::new(&user_dir);
        if let Err(e) = config_manager.load() {
            warn!(error = %e, "using default config");
        }

        Self::with_config(initial_value, config_manager.into_config(), user_dir)
    }

    pub fn with_config(initial_value: impl Into<String>, config: Config, user_dir: PathBuf) -> Self {
        let toast_manager = ToastManager::new()
            .with_duration(Duration::from_millis(config.ui.toast_duration_ms))
            .enabled(config.ui.show_toasts);

        let mut app = Self {
            running: true,
            value: initial_value.into(),
            editor: None,
            editor_focused: false,
            mount_key: None,
            field_area: None,
            commits: 0,
            status_message: None,
            user_dir,
            config,
            toast_manager,
            cursor_manager: CursorManager::new(),
            status_bar: StatusBar::new(),
        };

        app.init_status_bar();
        app
    }

    /// Run the UI until a quit event arrives
    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let app_state = Arc::new(RwLock::new(std::mem::take(self)));

        let event_bus = EventBus::new();
        let input_system = InputSystem::new(event_bus.clone());

        let keyboard_handler = KeyboardHandler::new(app_state.clone(), input_system.event_sender());
        let mouse_handler = MouseHandler::new(app_state.clone(), input_system.event_sender());
        let app_state_handler = AppStateHandler::new(app_state.clone(), input_system.event_sender());

        keyboard_handler.subscribe(&event_bus).await?;
        mouse_handler.subscribe(&event_bus).await?;
        app_state_handler.subscribe(&event_bus).await?;

        let event_bus_clone = event_bus.clone();
        tokio::spawn(async move {
            if let Err(e) = event_bus_clone.start_processing().await {
                error!(error = %e, "event processing stopped");
            }
        });

        let frame_duration = Duration::from_millis(16);
        let mut last_frame = Instant::now();

        loop {
            let frame_start = Instant::now();

            if !app_state.read().await.running {
                break;
            }

            if frame_start.duration_since(last_frame) >= frame_duration {
                let mut app = app_state.write().await;
                if let Err(e) = terminal.draw(|f| app.render(f)) {
                    error!(error = %e, "rendering failed");
                    break;
                }
                drop(app);
                last_frame = frame_start;
            }

            if event::poll(Duration::from_millis(1))? {
                if let Err(e) = input_system.handle_terminal_event(event::read()?) {
                    error!(error = %e, "failed to publish terminal event");
                }
            } else {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }

        // Handlers still hold clones of the Arc, so move the state out instead of unwrapping
        let mut app = app_state.write().await;
        *self = std::mem::take(&mut *app);

        info!(value = %self.value, commits = self.commits, "exiting");
        Ok(())
    }

    /// A mounted editor currently has focus
    pub fn is_editing(&self) -> bool {
        self.editor.is_some() && self.editor_focused
    }

    /// Mount a fresh editor seeded with the current value and focus it.
    ///
    /// An editor that is already mounted only regains focus; returns whether
    /// a new one was mounted.
    pub fn mount_editor(&mut self, on_value: OnValue) -> bool {
        self.editor_focused = true;
        if self.editor.is_some() {
            self.update_status_bar();
            return false;
        }

        let props = EditorProps::new(self.value.clone()).with_callback(on_value);
        self.editor = Some(InlineValueEditor::mount(props));
        self.update_status_bar();
        true
    }

    pub fn unmount_editor(&mut self) -> Option<InlineValueEditor> {
        let editor = self.editor.take();
        self.editor_focused = false;
        if editor.is_some() {
            debug!("unmounted inline editor");
            self.cursor_manager.hide_cursor(crate::widgets::VALUE_FIELD_CONTEXT);
            self.update_status_bar();
        }
        editor
    }

    /// Take focus from the mounted editor, which commits its live text.
    /// An editor without focus cannot lose it again.
    pub fn blur_editor(&mut self) -> Result<(), EditorError> {
        if !self.is_editing() {
            return Ok(());
        }
        self.editor_focused = false;
        self.cursor_manager.hide_cursor(crate::widgets::VALUE_FIELD_CONTEXT);

        let result = match self.editor.as_mut() {
            Some(editor) => editor.on_blur(),
            None => Ok(()),
        };
        self.update_status_bar();
        result
    }

    /// Store a committed value coming back from the editor's callback
    pub fn apply_commit(&mut self, text: &str) {
        self.value = text.to_string();
        self.commits += 1;
        self.toast_manager
            .push(format!("Committed \"{}\"", text), ToastType::Success);

        if self.config.editor.close_on_commit {
            self.unmount_editor();
        }
        self.update_status_bar();
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.update_status_bar();
    }

    pub fn init_status_bar(&mut self) {
        use crate::widgets::{SlotAlignment, StatusSlot};
        use ratatui::style::{Color, Style};

        self.status_bar.set_slot(
            StatusSlot::new("mode", "VIEW")
                .with_alignment(SlotAlignment::Left)
                .with_priority(100)
                .with_style(Style::default().fg(Color::White).bg(Color::DarkGray)),
        );
        self.status_bar.set_slot(
            StatusSlot::new("length", "")
                .with_alignment(SlotAlignment::Left)
                .with_priority(80),
        );
        self.status_bar.set_slot(
            StatusSlot::new("message", "")
                .with_alignment(SlotAlignment::Left)
                .with_priority(60)
                .with_style(Style::default().fg(Color::Black).bg(Color::Yellow)),
        );
        self.status_bar.set_slot(
            StatusSlot::new("commits", "")
                .with_alignment(SlotAlignment::Right)
                .with_priority(100),
        );

        self.update_status_bar();
    }

    pub fn update_status_bar(&mut self) {
        let (mode, length) = match &self.editor {
            Some(editor) => {
                let phase = match (self.editor_focused, editor.phase()) {
                    (false, _) => "BLURRED",
                    (true, crate::editor::EditorPhase::Editing) => "EDITING",
                    (true, crate::editor::EditorPhase::Committed) => "COMMITTED",
                };
                (phase, editor.field().len_chars())
            }
            None => ("VIEW", self.value.chars().count()),
        };

        self.status_bar.update_slot_content("mode", mode);
        self.status_bar
            .update_slot_content("length", format!("{} chars", length));
        self.status_bar.update_slot_content(
            "message",
            self.status_message.clone().unwrap_or_default(),
        );
        self.status_bar
            .update_slot_content("commits", format!("Commits: {}", self.commits));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(String::new(), Config::default(), PathBuf::from("."))
    }
}

/// `<config dir>/inline-edit`, or the working directory when there is none
pub fn default_user_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inline-edit")
}
