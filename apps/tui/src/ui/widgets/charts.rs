use crate::analytics::{format_grouped, CorrelationPoint, DashboardView, YieldBar};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs,
};
use ratatui::Frame;

use crate::ui::widgets::radar::render_practice_radar;

pub const YIELD_BAR_COLOR: Color = Color::Rgb(76, 175, 80);
pub const PRODUCTION_POINT_COLOR: Color = Color::Rgb(136, 132, 216);
pub const CORRELATION_POINT_COLOR: Color = Color::Rgb(255, 128, 66);

const REGION_PALETTE: [Color; 8] = [
    Color::Rgb(0, 136, 254),
    Color::Rgb(0, 196, 159),
    Color::Rgb(255, 187, 40),
    Color::Rgb(255, 128, 66),
    Color::Rgb(136, 132, 216),
    Color::Rgb(130, 202, 157),
    Color::Rgb(255, 198, 88),
    Color::Rgb(141, 209, 225),
];

pub const fn region_color(index: usize) -> Color {
    REGION_PALETTE[index % REGION_PALETTE.len()]
}

pub fn render_chart_tabs(tab_index: usize, f: &mut Frame<'_>, area: Rect) {
    let titles = ["Yield & Production", "Fertilizer & Practices"]
        .iter()
        .map(|title| TextLine::from(*title))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(tab_index)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

pub fn render_chart_panel(view: &DashboardView, tab_index: usize, f: &mut Frame<'_>, area: Rect) {
    let chart_split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    if tab_index == 0 {
        render_yield_barchart(&view.yield_bars, f, chart_split[0]);
        render_scatter(
            &ScatterSpec {
                title: "Production vs Land Area",
                x_title: "Land Area (ha)",
                y_title: "Production (t)",
                color: PRODUCTION_POINT_COLOR,
            },
            &view.production_vs_land,
            f,
            chart_split[1],
        );
    } else {
        render_scatter(
            &ScatterSpec {
                title: "Fertilizer Impact on Yield",
                x_title: "Fertilizer (kg/ha)",
                y_title: "Yield (kg/ha)",
                color: CORRELATION_POINT_COLOR,
            },
            &view.correlation,
            f,
            chart_split[0],
        );
        render_practice_radar(view, f, chart_split[1]);
    }
}

fn placeholder(title: &str, message: &str, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let paragraph = Paragraph::new(message.to_string())
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(paragraph, area);
}

pub fn render_yield_barchart(bars: &[YieldBar], f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "Crop Yield by State (kg/ha)";

    if bars.is_empty() {
        placeholder(TITLE, "No states to chart", f, area);
        return;
    }

    let count = u16::try_from(bars.len()).unwrap_or(u16::MAX);
    let inner_width = area.width.saturating_sub(2);
    let bar_gap = 1;
    let bar_width = (inner_width / count).saturating_sub(bar_gap).clamp(1, 12);

    let chart_bars: Vec<Bar<'_>> = bars
        .iter()
        .map(|bar| {
            Bar::default()
                .value(bar.value)
                .label(TextLine::from(short_label(&bar.region, bar_width)))
                .text_value(format_grouped(bar.value as f64))
                .style(Style::default().fg(YIELD_BAR_COLOR))
                .value_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(YIELD_BAR_COLOR)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let max_value = bars.iter().map(|bar| bar.value).max().unwrap_or(0).max(1);

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(TITLE)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .data(BarGroup::default().bars(&chart_bars))
        .max(max_value)
        .bar_gap(bar_gap)
        .bar_width(bar_width);

    f.render_widget(chart, area);
}

pub struct ScatterSpec {
    pub title: &'static str,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub color: Color,
}

pub fn render_scatter(
    spec: &ScatterSpec,
    points: &[CorrelationPoint],
    f: &mut Frame<'_>,
    area: Rect,
) {
    if points.is_empty() {
        placeholder(spec.title, "No states to plot", f, area);
        return;
    }

    let data: Vec<(f64, f64)> = points.iter().map(|point| (point.x, point.y)).collect();
    let x_bounds = axis_bounds(points.iter().map(|point| point.x));
    let y_bounds = axis_bounds(points.iter().map(|point| point.y));

    let datasets = vec![Dataset::default()
        .name("States")
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(spec.color))
        .data(&data)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(spec.title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .x_axis(
            Axis::default()
                .title(spec.x_title)
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(spec.y_title)
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );

    f.render_widget(chart, area);
}

/// Data range padded by 10% on each side. A single value gets a window
/// around it so the point isn't drawn on the border.
pub fn axis_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
        (min.min(value), max.max(value))
    });

    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }

    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.1
    } else {
        (max.abs() * 0.1).max(1.0)
    };

    [(min - pad).max(0.0), max + pad]
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .into_iter()
        .map(|value| Span::raw(format_grouped(value.round())))
        .collect()
}

/// Fits a region name into `width` cells: the full name when it fits,
/// initials for multi-word names, otherwise a truncated prefix.
pub fn short_label(name: &str, width: u16) -> String {
    let width = usize::from(width.max(1));
    if name.chars().count() <= width {
        return name.to_string();
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() > 1 {
        let initials: String = words.iter().filter_map(|word| word.chars().next()).collect();
        if initials.chars().count() <= width {
            return initials;
        }
    }

    name.chars().take(width).collect()
}
