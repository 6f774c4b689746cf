use std::collections::HashMap;
use std::time::{Duration, Instant};

use ratatui::{prelude::*, widgets::StatefulWidget};

const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Block cursor drawn by inverting a single cell
#[derive(Debug, Clone)]
pub struct Cursor {
    pub position: Position,
    pub style: Style,
}

/// Blink and visibility state for one cursor context
#[derive(Debug, Clone)]
pub struct CursorState {
    pub position: Position,
    pub visible: bool,
    pub blink_on: bool,
    pub last_blink: Instant,
    /// Typing keeps the cursor solid until this much idle time has passed
    pub activity_timeout: Duration,
    pub last_activity: Instant,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            position: Position::new(0, 0),
            visible: false,
            blink_on: true,
            last_blink: Instant::now(),
            activity_timeout: Duration::from_millis(1000),
            last_activity: Instant::now(),
        }
    }
}

impl Cursor {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            style: Style::default().bg(Color::White).fg(Color::Black),
        }
    }
}

impl StatefulWidget for Cursor {
    type State = CursorState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.position = self.position;
        if !state.visible {
            return;
        }

        let now = Instant::now();
        let show = if now.duration_since(state.last_activity) < state.activity_timeout {
            true
        } else {
            if now.duration_since(state.last_blink) > BLINK_INTERVAL {
                state.blink_on = !state.blink_on;
                state.last_blink = now;
            }
            state.blink_on
        };

        if show && area.contains(self.position) {
            if let Some(cell) = buf.cell_mut(self.position) {
                cell.set_style(self.style);
            }
        }
    }
}

/// Tracks one cursor per focusable context; at most one is active
#[derive(Debug, Default)]
pub struct CursorManager {
    cursors: HashMap<String, CursorState>,
    active_context: Option<String>,
}

impl CursorManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `context` the only visible cursor
    pub fn set_active_context(&mut self, context: &str) {
        for state in self.cursors.values_mut() {
            state.visible = false;
        }
        self.active_context = Some(context.to_string());
        self.cursors.entry(context.to_string()).or_default().visible = true;
    }

    pub fn get_active_context(&self) -> Option<&str> {
        self.active_context.as_deref()
    }

    /// Move the cursor of the active context; ignored for inactive ones
    pub fn update_cursor_position(&mut self, context: &str, x: u16, y: u16) {
        if self.active_context.as_deref() != Some(context) {
            return;
        }

        let state = self.cursors.entry(context.to_string()).or_default();
        let position = Position::new(x, y);
        if state.position != position {
            state.last_activity = Instant::now();
            state.blink_on = true;
        }
        state.position = position;
        state.visible = true;
    }

    pub fn hide_cursor(&mut self, context: &str) {
        if let Some(state) = self.cursors.get_mut(context) {
            state.visible = false;
        }
        if self.active_context.as_deref() == Some(context) {
            self.active_context = None;
        }
    }

    pub fn get_cursor_position(&self, context: &str) -> Option<Position> {
        if self.active_context.as_deref() != Some(context) {
            return None;
        }
        self.cursors
            .get(context)
            .filter(|state| state.visible)
            .map(|state| state.position)
    }

    pub fn get_cursor_state_mut(&mut self, context: &str) -> Option<&mut CursorState> {
        if self.active_context.as_deref() == Some(context) {
            self.cursors.get_mut(context)
        } else {
            None
        }
    }

    /// Keep the active cursor solid after typing
    pub fn notify_activity_for_active(&mut self) {
        if let Some(context) = self.active_context.clone() {
            if let Some(state) = self.cursors.get_mut(&context) {
                state.last_activity = Instant::now();
                state.blink_on = true;
            }
        }
    }
}

/// Widgets that know where the terminal cursor belongs inside them
pub trait CursorSupport {
    fn cursor_position(&self, area: Rect) -> Position;

    fn cursor_context(&self) -> &str;
}
