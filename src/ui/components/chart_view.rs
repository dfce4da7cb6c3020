//! Chart component: draws value counts as the requested chart kind

use std::f64::consts::PI;

use ratatui::{
    layout::{Alignment, Direction, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
    },
    Frame,
};

use super::super::layout::LayoutManager;
use crate::report::chart::{self as prep, FiveNumberSummary};
use crate::report::{ChartKind, ValueCounts};

/// Slice and legend colors, cycled
const PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightYellow,
];

/// Shades from sparse to dense
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Grid resolution of pie slices across the unit square
const PIE_RESOLUTION: usize = 120;

/// Chart component
pub struct ChartView<'a> {
    counts: &'a ValueCounts,
    kind: ChartKind,
}

impl<'a> ChartView<'a> {
    pub fn new(counts: &'a ValueCounts, kind: ChartKind) -> Self {
        Self { counts, kind }
    }

    pub fn title(&self) -> String {
        format!(
            " {} of '{}' ({} values) ",
            self.kind,
            self.counts.category,
            self.counts.total()
        )
    }

    /// Render the chart into `area`
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));

        if self.counts.entries.is_empty() {
            f.render_widget(block, area);
            let message_area = LayoutManager::centered_rect_lines(60, 1, area);
            let message = Paragraph::new("No values to chart").alignment(Alignment::Center);
            f.render_widget(message, message_area);
            return;
        }

        match self.kind {
            ChartKind::Bar => self.render_bars(f, area, block, self.count_bars(), Direction::Vertical),
            ChartKind::HorizontalBar => self.render_bars(f, area, block, self.count_bars(), Direction::Horizontal),
            ChartKind::Histogram => {
                let bars = prep::histogram(self.counts)
                    .into_iter()
                    .map(|bin| (format!("{:.1}", bin.lower), bin.count as u64))
                    .collect();
                self.render_bars(f, area, block, bars, Direction::Vertical)
            }
            ChartKind::Line => self.render_counts_xy(f, area, block, GraphType::Line, Marker::Braille),
            ChartKind::Scatter => self.render_counts_xy(f, area, block, GraphType::Scatter, Marker::Dot),
            ChartKind::Area => self.render_counts_xy(f, area, block, GraphType::Bar, Marker::HalfBlock),
            ChartKind::Kde | ChartKind::Density => self.render_density(f, area, block),
            ChartKind::Box => self.render_box(f, area, block),
            ChartKind::Pie => self.render_pie(f, area, block),
            ChartKind::Hexbin => self.render_hexbin(f, area, block),
        }
    }

    fn count_bars(&self) -> Vec<(String, u64)> {
        self.counts
            .entries
            .iter()
            .map(|(label, count)| (label.clone(), *count as u64))
            .collect()
    }

    fn render_bars(&self, f: &mut Frame, area: Rect, block: Block, bars: Vec<(String, u64)>, direction: Direction) {
        let bar_width = match direction {
            Direction::Vertical => LayoutManager::bar_width(area.width, bars.len()),
            Direction::Horizontal => 1,
        };
        let bars: Vec<Bar> = bars
            .into_iter()
            .map(|(label, value)| Bar::default().value(value).label(Line::from(label)))
            .collect();

        let chart = BarChart::default()
            .block(block)
            .direction(direction)
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .label_style(Style::default().fg(Color::White))
            .data(BarGroup::default().bars(&bars));

        f.render_widget(chart, area);
    }

    fn render_counts_xy(&self, f: &mut Frame, area: Rect, block: Block, graph_type: GraphType, marker: Marker) {
        let points = prep::series(self.counts);
        let labels = self.counts.labels();
        let x_max = (points.len().saturating_sub(1) as f64).max(1.0);
        let y_max = self.counts.max_count() as f64 * 1.1;

        let x_labels = vec![
            Span::raw(labels.first().copied().unwrap_or_default().to_string()),
            Span::raw(labels.last().copied().unwrap_or_default().to_string()),
        ];
        let y_labels = vec![Span::raw("0"), Span::raw(format!("{}", self.counts.max_count()))];

        let dataset = Dataset::default()
            .name(self.counts.category.clone())
            .marker(marker)
            .graph_type(graph_type)
            .style(Style::default().fg(Color::Cyan))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .title(self.counts.category.clone())
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title("count")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, y_max])
                    .labels(y_labels),
            );

        f.render_widget(chart, area);
    }

    fn render_density(&self, f: &mut Frame, area: Rect, block: Block) {
        let points = prep::kde(self.counts);
        let (x_min, x_max) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first.0, last.0),
            _ => (0.0, 1.0),
        };
        let y_max = points.iter().map(|(_, y)| *y).fold(0.0, f64::max) * 1.1;

        let dataset = Dataset::default()
            .name("density")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .title("count")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([x_min, x_max])
                    .labels(vec![Span::raw(format!("{:.1}", x_min)), Span::raw(format!("{:.1}", x_max))]),
            )
            .y_axis(
                Axis::default()
                    .title("density")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, y_max])
                    .labels(vec![Span::raw("0"), Span::raw(format!("{:.3}", y_max))]),
            );

        f.render_widget(chart, area);
    }

    fn render_box(&self, f: &mut Frame, area: Rect, block: Block) {
        let Some(summary) = prep::five_number_summary(self.counts) else {
            f.render_widget(block, area);
            return;
        };

        let plot_width = (area.width.saturating_sub(4) as usize).min(72);
        let stat = |name: &'static str, value: f64| {
            Line::from(vec![
                Span::styled(format!("{:<8}", name), Style::default().fg(Color::Gray)),
                Span::raw(format!("{:.2}", value)),
            ])
        };

        let lines = vec![
            stat("min", summary.min),
            stat("q1", summary.q1),
            stat("median", summary.median),
            stat("q3", summary.q3),
            stat("max", summary.max),
            Line::from(""),
            Line::from(Span::styled(
                box_plot_line(&summary, plot_width),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
        ];

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_pie(&self, f: &mut Frame, area: Rect, block: Block) {
        let shares = prep::pie_shares(self.counts);
        let slices = pie_slices(&shares, PIE_RESOLUTION);

        let inner = block.inner(area);
        f.render_widget(block, area);
        let (canvas_area, legend_area) = LayoutManager::pie_layout(inner);

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-1.0, 1.0])
            .y_bounds([-1.0, 1.0])
            .paint(|ctx| {
                for (idx, coords) in slices.iter().enumerate() {
                    ctx.draw(&Points {
                        coords: coords.as_slice(),
                        color: PALETTE[idx % PALETTE.len()],
                    });
                }
            });
        f.render_widget(canvas, canvas_area);

        let legend: Vec<Line> = self
            .counts
            .entries
            .iter()
            .zip(&shares)
            .enumerate()
            .map(|(idx, ((label, count), (_, share)))| {
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(PALETTE[idx % PALETTE.len()])),
                    Span::raw(format!("{}: {} ({:.1}%)", label, count, share * 100.0)),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(legend), legend_area);
    }

    fn render_hexbin(&self, f: &mut Frame, area: Rect, block: Block) {
        let max = self.counts.max_count();
        let label_width = self.counts.labels().iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let lines: Vec<Line> = self
            .counts
            .entries
            .iter()
            .map(|(label, count)| {
                let cell: String = std::iter::repeat(shade_for(*count, max)).take(8).collect();
                Line::from(vec![
                    Span::raw(format!("{:>w$} ", label, w = label_width)),
                    Span::styled(cell, Style::default().fg(Color::Yellow)),
                    Span::raw(format!(" {}", count)),
                ])
            })
            .collect();

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Shade character for `count` relative to the largest count
pub fn shade_for(count: usize, max: usize) -> char {
    if max == 0 || count == 0 {
        return SHADES[0];
    }
    let levels = SHADES.len() - 1;
    let level = ((count as f64 / max as f64) * levels as f64).ceil() as usize;
    SHADES[level.clamp(1, levels)]
}

/// Text box plot of `summary` spread across `width` columns
///
/// Whisker ends are `|`, the box spans `[` to `]` and the median is `:`.
pub fn box_plot_line(summary: &FiveNumberSummary, width: usize) -> String {
    if width < 2 {
        return String::new();
    }
    let span = summary.max - summary.min;
    let pos = |value: f64| {
        if span <= 0.0 {
            0
        } else {
            (((value - summary.min) / span) * (width - 1) as f64).round() as usize
        }
    };

    let mut cells = vec![' '; width];
    let (lo, q1, median, q3, hi) = (
        pos(summary.min),
        pos(summary.q1),
        pos(summary.median),
        pos(summary.q3),
        pos(summary.max),
    );
    for cell in cells.iter_mut().take(hi + 1).skip(lo) {
        *cell = '-';
    }
    for cell in cells.iter_mut().take(q3 + 1).skip(q1) {
        *cell = '=';
    }
    cells[lo] = '|';
    cells[hi] = '|';
    cells[q1] = '[';
    cells[q3] = ']';
    cells[median] = ':';
    cells.into_iter().collect()
}

/// Canvas points of each pie slice, in share order
///
/// Slices start at twelve o'clock and run clockwise. Points cover the unit
/// disc on a `resolution` x `resolution` grid.
pub fn pie_slices(shares: &[(String, f64)], resolution: usize) -> Vec<Vec<(f64, f64)>> {
    let mut slices = vec![Vec::new(); shares.len()];
    if shares.is_empty() || resolution < 2 {
        return slices;
    }

    let mut bounds = Vec::with_capacity(shares.len());
    let mut cumulative = 0.0;
    for (_, share) in shares {
        cumulative += share;
        bounds.push(cumulative);
    }

    let step = 2.0 / (resolution - 1) as f64;
    for i in 0..resolution {
        for j in 0..resolution {
            let x = -1.0 + step * i as f64;
            let y = -1.0 + step * j as f64;
            if x * x + y * y > 1.0 {
                continue;
            }
            let fraction = (PI / 2.0 - y.atan2(x)).rem_euclid(2.0 * PI) / (2.0 * PI);
            let idx = bounds
                .iter()
                .position(|bound| fraction < *bound)
                .unwrap_or(shares.len() - 1);
            slices[idx].push((x, y));
        }
    }
    slices
}
