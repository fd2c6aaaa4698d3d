//! "Current Temperature" and "Current Date and Time" value boxes.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::monitor::theme::Theme;

/// Text shown while a channel has no readings.
pub const WAITING_TEXT: &str = "waiting for first reading...";

/// A titled box showing one value.
#[derive(Debug, Clone)]
pub struct ValueBox<'a> {
    title: &'a str,
    body: Option<String>,
    style: Style,
    border: Style,
}

impl<'a> ValueBox<'a> {
    /// Creates a box; `None` renders the waiting text.
    #[must_use]
    pub fn new(title: &'a str, body: Option<String>, theme: &Theme) -> Self {
        Self {
            title,
            body,
            style: Style::default().fg(theme.fg()).add_modifier(Modifier::BOLD),
            border: Style::default().fg(theme.accent()),
        }
    }

    /// Overrides the body colour.
    #[must_use]
    pub fn body_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Text the box will show.
    #[must_use]
    pub fn text(&self) -> &str {
        self.body.as_deref().unwrap_or(WAITING_TEXT)
    }
}

impl Widget for ValueBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(self.border);

        let style = if self.body.is_some() {
            self.style
        } else {
            self.style.add_modifier(Modifier::DIM)
        };

        Paragraph::new(self.text().to_string())
            .style(style)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waiting_text_when_empty() {
        let theme = Theme::day();
        let vb = ValueBox::new("Current Temperature", None, &theme);
        assert_eq!(vb.text(), WAITING_TEXT);
    }

    #[test]
    fn test_renders_body() {
        let theme = Theme::night();
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);

        ValueBox::new("Now", Some("81.2 F".to_string()), &theme).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("81.2 F"));
        assert!(text.contains("Now"));
    }
}
