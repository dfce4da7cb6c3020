//! Status bar component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::constants::CHART_STATUS_LINE;
use crate::report::ValueCounts;

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Text shown under the chart
    pub fn text(counts: &ValueCounts) -> String {
        format!(
            "{} distinct values • {} rows • {}",
            counts.entries.len(),
            counts.total(),
            CHART_STATUS_LINE
        )
    }

    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, counts: &ValueCounts) {
        let status_bar = Paragraph::new(Self::text(counts))
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));

        f.render_widget(status_bar, area);
    }
}
