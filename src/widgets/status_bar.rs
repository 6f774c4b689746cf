use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAlignment {
    Left,
    Right,
}

/// A named piece of text on the status bar
#[derive(Debug, Clone)]
pub struct StatusSlot {
    pub id: String,
    pub content: String,
    pub alignment: SlotAlignment,
    pub priority: u8, // higher is drawn closer to its edge
    pub style: Style,
}

impl StatusSlot {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            alignment: SlotAlignment::Left,
            priority: 50,
            style: Style::default().fg(Color::White).bg(Color::LightBlue),
        }
    }

    pub fn with_alignment(mut self, alignment: SlotAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

#[derive(Clone)]
pub struct StatusBar {
    slots: HashMap<String, StatusSlot>,
    background_style: Style,
    separator: String,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            background_style: Style::default().bg(Color::LightBlue).fg(Color::White),
            separator: " | ".to_string(),
        }
    }

    pub fn set_slot(&mut self, slot: StatusSlot) {
        self.slots.insert(slot.id.clone(), slot);
    }

    pub fn slot(&self, id: &str) -> Option<&StatusSlot> {
        self.slots.get(id)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn update_slot_content(&mut self, id: &str, content: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.content = content.into();
        }
    }

    fn visible_slots(&self, alignment: SlotAlignment) -> Vec<&StatusSlot> {
        let mut slots: Vec<&StatusSlot> = self
            .slots
            .values()
            .filter(|s| s.alignment == alignment && !s.content.is_empty())
            .collect();
        slots.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
        slots
    }

    fn spans_for<'a>(&'a self, slots: &[&'a StatusSlot]) -> Vec<Span<'a>> {
        let mut spans = Vec::new();
        for (i, slot) in slots.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator.as_str(), self.background_style));
            }
            spans.push(Span::styled(format!(" {} ", slot.content), slot.style));
        }
        spans
    }
}

fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|span| span.content.chars().count()).sum()
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 {
            return;
        }

        let left_slots = self.visible_slots(SlotAlignment::Left);
        let mut right_slots = self.visible_slots(SlotAlignment::Right);
        // Highest priority sits at the right edge
        right_slots.reverse();

        let left = self.spans_for(&left_slots);
        let right = self.spans_for(&right_slots);
        let available = area.width as usize;
        let left_width = spans_width(&left);
        let right_width = spans_width(&right);

        let mut spans = left;
        if left_width + right_width <= available {
            spans.push(Span::styled(
                " ".repeat(available - left_width - right_width),
                self.background_style,
            ));
            spans.extend(right);
        }
        // Left content wins when both sides do not fit; the paragraph clips it

        Paragraph::new(Line::from(spans))
            .style(self.background_style)
            .render(area, buf);
    }
}
