//! Terminal chart viewer: terminal setup, event loop and teardown

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::io::{self, Write};

use super::components::{ChartView, StatusBar};
use super::layout::LayoutManager;
use crate::error::Result;
use crate::report::{ChartKind, ChartRenderer, ValueCounts};

/// Renders charts full-screen in the current terminal
///
/// Each call blocks until the user presses `q`, `Esc` or `Enter`.
#[derive(Debug, Default)]
pub struct TerminalChart;

impl ChartRenderer for TerminalChart {
    fn render(&mut self, counts: &ValueCounts, kind: ChartKind) -> Result<()> {
        show_chart(counts, kind)?;
        Ok(())
    }
}

/// Draw the chart and the status bar into one frame
pub fn draw(f: &mut Frame, counts: &ValueCounts, kind: ChartKind) {
    let (chart_area, status_area) = LayoutManager::viewer_layout(f.area());
    ChartView::new(counts, kind).render(f, chart_area);
    StatusBar::render(f, status_area, counts);
}

/// Whether `key` dismisses the viewer
pub fn is_dismiss_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
}

/// Puts the terminal back into cooked mode on the main screen when dropped
///
/// Each step is undone only if it was applied, and teardown keeps going past
/// a failing step.
#[derive(Debug, Default)]
struct TerminalGuard {
    raw_mode: bool,
    alternate_screen: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        let mut guard = Self::default();
        enable_raw_mode()?;
        guard.raw_mode = true;
        execute!(io::stdout(), EnterAlternateScreen)?;
        guard.alternate_screen = true;
        Ok(guard)
    }

    fn restore_to<W: Write>(&mut self, out: &mut W) {
        if self.raw_mode {
            if let Err(e) = disable_raw_mode() {
                warn!("Failed to disable raw mode: {}", e);
            }
            self.raw_mode = false;
        }
        if self.alternate_screen {
            if let Err(e) = execute!(out, LeaveAlternateScreen, Show) {
                warn!("Failed to leave the alternate screen: {}", e);
            }
            self.alternate_screen = false;
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore_to(&mut io::stdout());
    }
}

/// Show the chart until dismissed, restoring the terminal afterwards
pub fn show_chart(counts: &ValueCounts, kind: ChartKind) -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    run_viewer_loop(&mut terminal, counts, kind)
}

fn run_viewer_loop<B: Backend>(terminal: &mut Terminal<B>, counts: &ValueCounts, kind: ChartKind) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, counts, kind))?;

        // Resize and other events fall through to a redraw
        if let Event::Key(key) = event::read()? {
            if is_dismiss_key(&key) {
                debug!("Chart viewer dismissed with {:?}", key.code);
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn weekday_counts() -> ValueCounts {
        ValueCounts {
            category: "weekday".to_string(),
            entries: vec![("1".to_string(), 5), ("2".to_string(), 5), ("3".to_string(), 3), ("0".to_string(), 2)],
        }
    }

    fn screen(counts: &ValueCounts, kind: ChartKind) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, counts, kind)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_every_kind_draws_title_and_status() {
        let counts = weekday_counts();
        for kind in ChartKind::ALL {
            let text = screen(&counts, kind);
            assert!(
                text.contains(&format!("{} of 'weekday'", kind)),
                "missing title for {}",
                kind
            );
            assert!(text.contains("q / Esc / Enter: close"), "missing status for {}", kind);
        }
    }

    #[test]
    fn test_pie_legend_shows_shares() {
        let text = screen(&weekday_counts(), ChartKind::Pie);
        assert!(text.contains("1: 5 (33.3%)"));
        assert!(text.contains("0: 2 (13.3%)"));
    }

    #[test]
    fn test_empty_counts_message() {
        let counts = ValueCounts {
            category: "hour".to_string(),
            entries: Vec::new(),
        };
        let text = screen(&counts, ChartKind::Bar);
        assert!(text.contains("No values to chart"));
    }

    #[test]
    fn test_guard_leaves_alternate_screen_once() {
        let mut guard = TerminalGuard {
            raw_mode: false,
            alternate_screen: true,
        };
        let mut out = Vec::new();
        guard.restore_to(&mut out);
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));

        let mut again = Vec::new();
        guard.restore_to(&mut again);
        assert!(again.is_empty());
    }

    #[test]
    fn test_dismiss_keys() {
        assert!(is_dismiss_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_dismiss_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_dismiss_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!is_dismiss_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
    }
}
