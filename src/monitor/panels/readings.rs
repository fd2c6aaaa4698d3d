//! "Most Recent Readings" table.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Row, Table, Widget};

use crate::monitor::theme::Theme;
use crate::snapshot::ReadingTable;
use crate::trend::TrendResult;

/// History table, oldest row first; adds the fitted column when a trend
/// exists.
#[derive(Debug, Clone)]
pub struct ReadingsTable<'a> {
    table: &'a ReadingTable,
    trend: Option<&'a TrendResult>,
    theme: &'a Theme,
}

impl<'a> ReadingsTable<'a> {
    /// Creates the table widget.
    #[must_use]
    pub fn new(table: &'a ReadingTable, trend: Option<&'a TrendResult>, theme: &'a Theme) -> Self {
        Self { table, trend, theme }
    }

    /// Header labels for the current data.
    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = ReadingTable::COLUMNS.to_vec();
        if self.trend.is_some() {
            headers.push(ReadingTable::FIT_COLUMN);
        }
        headers
    }

    /// Formatted cell text, row by row.
    #[must_use]
    pub fn cells(&self) -> Vec<Vec<String>> {
        match self.trend {
            Some(trend) => self
                .table
                .with_fitted(trend)
                .into_iter()
                .map(|row| {
                    vec![
                        format!("{:.1}", row.reading.value()),
                        row.reading.timestamp_text(),
                        format!("{:.2}", row.best_fit),
                    ]
                })
                .collect(),
            None => self
                .table
                .rows()
                .iter()
                .map(|r| vec![format!("{:.1}", r.value()), r.timestamp_text()])
                .collect(),
        }
    }
}

impl Widget for ReadingsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(self.headers()).style(
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD),
        );
        let rows = self
            .cells()
            .into_iter()
            .map(|cells| Row::new(cells).style(Style::default().fg(self.theme.fg())));

        let widths = [
            Constraint::Length(10),
            Constraint::Length(21),
            Constraint::Length(15),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title(" Most Recent Readings ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent())),
            )
            .render(area, buf);
    }
}
