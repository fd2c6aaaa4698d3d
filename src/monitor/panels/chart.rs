//! "Chart with Current Trend": readings as points plus the regression line.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget};

use crate::config::ChannelProfile;
use crate::feed::PanelData;
use crate::monitor::theme::Theme;
use crate::trend::Trend;

/// Padding added around the channel range on the y axis.
const Y_PADDING: f64 = 0.1;

/// Scatter-plus-line chart for one channel.
#[derive(Debug, Clone)]
pub struct TrendChart<'a> {
    panel: &'a PanelData,
    profile: ChannelProfile,
    theme: &'a Theme,
}

impl<'a> TrendChart<'a> {
    /// Creates the chart widget.
    #[must_use]
    pub fn new(panel: &'a PanelData, profile: ChannelProfile, theme: &'a Theme) -> Self {
        Self {
            panel,
            profile,
            theme,
        }
    }

    /// `(row index, value)` for every reading.
    #[must_use]
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.panel
            .table
            .values()
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i as f64, v))
            .collect()
    }

    /// `(row index, fitted value)`; empty without a trend.
    #[must_use]
    pub fn fit_points(&self) -> Vec<(f64, f64)> {
        self.panel
            .trend
            .as_ref()
            .map(|t| {
                t.fitted_values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| (i as f64, v))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Y-axis bounds: the channel range, padded.
    #[must_use]
    pub fn y_bounds(&self) -> [f64; 2] {
        let lo = self.profile.min.min(self.profile.max);
        let hi = self.profile.min.max(self.profile.max);
        [lo - Y_PADDING, hi + Y_PADDING]
    }

    /// Chart title, including the trend direction when known.
    #[must_use]
    pub fn title(&self) -> String {
        let direction = match self.panel.trend.as_ref().map(|t| t.direction()) {
            Some(Trend::Rising) => " (rising)",
            Some(Trend::Falling) => " (falling)",
            Some(Trend::Flat) => " (flat)",
            None => "",
        };
        format!(" Temperature Readings with Regression Line{direction} ")
    }
}

impl Widget for TrendChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let points = self.points();
        let fit = self.fit_points();
        let [y_lo, y_hi] = self.y_bounds();
        let x_hi = (points.len().saturating_sub(1) as f64).max(1.0);

        let mut datasets = vec![Dataset::default()
            .name("Readings")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(self.theme.series()))
            .data(&points)];
        if !fit.is_empty() {
            datasets.push(
                Dataset::default()
                    .name("Regression Line")
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.theme.fit_line()))
                    .data(&fit),
            );
        }

        let timestamps = self.panel.table.timestamps();
        let x_labels = match (timestamps.first(), timestamps.last()) {
            (Some(first), Some(last)) if timestamps.len() > 1 => vec![first.clone(), last.clone()],
            (Some(only), _) => vec![only.clone()],
            _ => Vec::new(),
        };
        let y_labels = vec![format!("{y_lo:.1}"), format!("{y_hi:.1}")];

        Chart::new(datasets)
            .block(
                Block::default()
                    .title(self.title())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent())),
            )
            .x_axis(
                Axis::default()
                    .title("Time")
                    .style(Style::default().fg(self.theme.fg()))
                    .bounds([0.0, x_hi])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title("Temperature")
                    .style(Style::default().fg(self.theme.fg()))
                    .bounds([y_lo, y_hi])
                    .labels(y_labels),
            )
            .render(area, buf);
    }
}
