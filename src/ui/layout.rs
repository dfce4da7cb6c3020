//! Layout management and calculations

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the pie chart legend in columns
const LEGEND_WIDTH: u16 = 28;

/// Manages layout calculations and constraints for the chart viewer
pub struct LayoutManager;

impl LayoutManager {
    /// Split the screen into the chart area and a one-line status bar below it
    #[must_use]
    pub fn viewer_layout(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        (chunks[0], chunks[1])
    }

    /// Split a chart area into the pie canvas and its legend
    #[must_use]
    pub fn pie_layout(area: Rect) -> (Rect, Rect) {
        let legend_width = std::cmp::min(LEGEND_WIDTH, area.width / 2);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(legend_width)])
            .split(area);
        (chunks[0], chunks[1])
    }

    /// Calculate a centered rectangle with percentage width and fixed line height
    #[must_use]
    pub fn centered_rect_lines(percent_x: u16, height_lines: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(height_lines),
                Constraint::Min(0),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }

    /// Width of each vertical bar so `bars` bars fit in `width` columns
    #[must_use]
    pub fn bar_width(width: u16, bars: usize) -> u16 {
        if bars == 0 {
            return 1;
        }
        let inner = width.saturating_sub(2) as usize; // Account for borders
        let per_bar = inner / bars;
        (per_bar.saturating_sub(1)).clamp(1, 9) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_layout_reserves_status_line() {
        let (chart, status) = LayoutManager::viewer_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(chart.height, 23);
        assert_eq!(status.height, 1);
        assert_eq!(status.y, 23);
    }

    #[test]
    fn test_pie_layout_legend_width() {
        let (canvas, legend) = LayoutManager::pie_layout(Rect::new(0, 0, 80, 20));
        assert_eq!(legend.width, LEGEND_WIDTH);
        assert_eq!(canvas.width, 80 - LEGEND_WIDTH);

        let (_, narrow_legend) = LayoutManager::pie_layout(Rect::new(0, 0, 30, 20));
        assert_eq!(narrow_legend.width, 15);
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(LayoutManager::bar_width(80, 7), 9);
        assert_eq!(LayoutManager::bar_width(30, 7), 3);
        assert_eq!(LayoutManager::bar_width(10, 50), 1);
        assert_eq!(LayoutManager::bar_width(80, 0), 1);
    }
}
