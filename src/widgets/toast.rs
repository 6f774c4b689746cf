use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub enum ToastType {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastType {
    fn color(&self) -> Color {
        match self {
            ToastType::Info => Color::Cyan,
            ToastType::Success => Color::Green,
            ToastType::Warning => Color::Yellow,
            ToastType::Error => Color::Red,
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Info => "ℹ",
            ToastType::Success => "✓",
            ToastType::Warning => "⚠",
            ToastType::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Holds pending toasts; the newest ones win when over capacity
pub struct ToastManager {
    toasts: Vec<Toast>,
    max_toasts: usize,
    default_duration: Duration,
    enabled: bool,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: Vec::new(),
            max_toasts: 3,
            default_duration: Duration::from_secs(3),
            enabled: true,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn push(&mut self, message: impl Into<String>, toast_type: ToastType) {
        if !self.enabled {
            return;
        }
        self.toasts
            .push(Toast::new(message, toast_type).with_duration(self.default_duration));

        if self.toasts.len() > self.max_toasts {
            let excess = self.toasts.len() - self.max_toasts;
            self.toasts.drain(..excess);
        }
    }

    pub fn update(&mut self) {
        self.toasts.retain(|toast| !toast.is_expired());
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn has_active_toasts(&self) -> bool {
        !self.toasts.is_empty()
    }

    fn render_single_toast(&self, toast: &Toast, area: Rect, buf: &mut Buffer) {
        let color = toast.toast_type.color();
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(Color::Rgb(30, 30, 30)));
        let inner = block.inner(area);
        block.render(area, buf);

        let room = (inner.width as usize).saturating_sub(2);
        let message: String = if toast.message.chars().count() > room {
            let mut cut: String = toast.message.chars().take(room.saturating_sub(3)).collect();
            cut.push_str("...");
            cut
        } else {
            toast.message.clone()
        };

        let content = Line::from(vec![
            Span::styled(
                format!("{} ", toast.toast_type.icon()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(message, Style::default().fg(Color::White)),
        ]);
        Paragraph::new(content).render(inner, buf);
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws the active toasts stacked in the top-right corner
pub struct ToastWidget<'a> {
    manager: &'a ToastManager,
}

impl<'a> ToastWidget<'a> {
    pub fn new(manager: &'a ToastManager) -> Self {
        Self { manager }
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 40.min(area.width.saturating_sub(2));
        if width < 8 {
            return;
        }

        for (i, toast) in self.manager.toasts.iter().enumerate() {
            let y = area.y + 1 + i as u16 * 3;
            if y + 3 > area.y + area.height {
                break;
            }
            let toast_area = Rect {
                x: area.x + area.width.saturating_sub(width + 1),
                y,
                width,
                height: 3,
            };
            self.manager.render_single_toast(toast, toast_area, buf);
        }
    }
}
