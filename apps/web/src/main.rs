mod view;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    symbols::Marker,
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType,
        Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
    },
    Frame, Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Request, RequestInit, RequestMode, Response};

use view::{axis_bounds, cycle, format_grouped, DashboardExport, Kpi};

const SNAPSHOT_URL: &str = "dashboard.json";
const ACCENT: Color = Color::Rgb(76, 175, 80);

fn main() -> io::Result<()> {
    let data = Rc::new(RefCell::new(None::<DashboardExport>));
    let selection = Rc::new(RefCell::new(0_usize));
    let row_offset = Rc::new(RefCell::new(0_usize));

    spawn_local(fetch_snapshot(data.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let data = data.clone();
        let selection = selection.clone();
        let row_offset = row_offset.clone();
        move |event| {
            let options = data.borrow().as_ref().map_or(1, DashboardExport::option_count);
            match event.code {
                ratzilla::event::KeyCode::Left => {
                    let mut index = selection.borrow_mut();
                    *index = cycle(*index, options, false);
                    *row_offset.borrow_mut() = 0;
                }
                ratzilla::event::KeyCode::Right => {
                    let mut index = selection.borrow_mut();
                    *index = cycle(*index, options, true);
                    *row_offset.borrow_mut() = 0;
                }
                ratzilla::event::KeyCode::Char('a') => {
                    *selection.borrow_mut() = 0;
                    *row_offset.borrow_mut() = 0;
                }
                ratzilla::event::KeyCode::Up => {
                    let mut offset = row_offset.borrow_mut();
                    *offset = offset.saturating_sub(1);
                }
                ratzilla::event::KeyCode::Down => {
                    let mut offset = row_offset.borrow_mut();
                    *offset = (*offset + 1).min(options.saturating_sub(2));
                }
                _ => {}
            }
        }
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        let block = Block::default()
            .title("Agricultural Performance Dashboard")
            .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area).inner(Margin::new(1, 1));
        f.render_widget(block, area);

        let data = data.borrow();
        if let Some(export) = data.as_ref() {
            render_dashboard(export, *selection.borrow(), *row_offset.borrow(), f, inner);
        } else {
            let paragraph = Paragraph::new(Text::from(TextLine::from(format!(
                "Loading {SNAPSHOT_URL}..."
            ))))
            .alignment(Alignment::Center);
            f.render_widget(paragraph, inner);
        }
    });

    Ok(())
}

fn render_dashboard(
    export: &DashboardExport,
    selection: usize,
    row_offset: usize,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(11),
        ])
        .split(area);

    render_header(export, selection, f, layout[0]);
    render_cards(&export.cards(selection), f, layout[1]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(layout[2]);

    render_yield_chart(export, selection, f, charts[0]);
    render_correlation(export, f, charts[1]);
    render_practices(export, selection, f, charts[2]);
    render_table(export, selection, row_offset, f, layout[3]);
}

fn render_header(export: &DashboardExport, selection: usize, f: &mut Frame<'_>, area: Rect) {
    let line = TextLine::from(vec![
        Span::styled("Selected: ", Style::default().fg(Color::Gray)),
        Span::styled(
            export.selection_label(selection).to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("←/→ state  a all  ↑/↓ rows", Style::default().fg(Color::Gray)),
        Span::raw("   "),
        Span::styled(
            format!("snapshot {}", export.generated_at),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_cards(cards: &[Kpi], f: &mut Frame<'_>, area: Rect) {
    if cards.is_empty() {
        return;
    }

    let count = u32::try_from(cards.len()).unwrap_or(1);
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(cards.iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (card, slot) in cards.iter().zip(slots.iter()) {
        let paragraph = Paragraph::new(Span::styled(
            card.display.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .block(
            Block::default()
                .title(card.title.clone())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .alignment(Alignment::Center);
        f.render_widget(paragraph, *slot);
    }
}

fn render_yield_chart(export: &DashboardExport, selection: usize, f: &mut Frame<'_>, area: Rect) {
    let rows = export.rows(selection);
    let bars: Vec<Bar<'_>> = rows
        .iter()
        .map(|region| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = region.average_crop_yield.round().max(0.0) as u64;
            Bar::default()
                .value(value)
                .label(TextLine::from(region.name.clone()))
                .text_value(format_grouped(region.average_crop_yield))
                .style(Style::default().fg(ACCENT))
        })
        .collect();

    let count = u16::try_from(bars.len().max(1)).unwrap_or(u16::MAX);
    let bar_width = (area.width.saturating_sub(2) / count)
        .saturating_sub(1)
        .clamp(1, 12);

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Crop Yield by State (kg/ha)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_gap(1)
        .bar_width(bar_width);

    f.render_widget(chart, area);
}

/// Fertilizer against yield for every state, whatever the selection.
fn render_correlation(export: &DashboardExport, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Fertilizer Impact on Yield")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    if export.correlation.is_empty() {
        let paragraph = Paragraph::new("No states to plot")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let points: Vec<(f64, f64)> = export
        .correlation
        .iter()
        .map(|point| (point.x, point.y))
        .collect();
    let x_bounds = axis_bounds(points.iter().map(|(x, _)| *x));
    let y_bounds = axis_bounds(points.iter().map(|(_, y)| *y));

    let dataset = Dataset::default()
        .name("States")
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Rgb(255, 128, 66)))
        .data(&points);

    let labels = |bounds: [f64; 2]| {
        [bounds[0], bounds[1]]
            .map(|value| Span::raw(format_grouped(value.round())))
            .to_vec()
    };

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title("Fertilizer (kg/ha)")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("Yield (kg/ha)")
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(labels(y_bounds)),
        );

    f.render_widget(chart, area);
}

fn render_practices(export: &DashboardExport, selection: usize, f: &mut Frame<'_>, area: Rect) {
    let profile = export.profile(selection);
    let title = profile.map_or_else(
        || "Farming Practices".to_string(),
        |profile| format!("{} Farming Practices", profile.region),
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let Some(profile) = profile else {
        let paragraph = Paragraph::new("Please select a state to view detailed farming practices")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    };

    let bars: Vec<Bar<'_>> = profile
        .axes
        .iter()
        .map(|axis| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = axis.score.clamp(0.0, axis.full_mark).round() as u64;
            Bar::default()
                .value(value)
                .label(TextLine::from(axis.subject.clone()))
                .text_value(format_grouped(axis.score.round()))
                .style(Style::default().fg(Color::Rgb(136, 132, 216)))
        })
        .collect();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max = profile
        .axes
        .iter()
        .map(|axis| axis.full_mark)
        .fold(1.0_f64, f64::max) as u64;

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .max(max)
        .bar_gap(0)
        .bar_width(1);

    f.render_widget(chart, area);
}

fn render_table(
    export: &DashboardExport,
    selection: usize,
    row_offset: usize,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let rows = export.rows(selection);
    let visible = usize::from(area.height.saturating_sub(3));
    let offset = row_offset.min(rows.len().saturating_sub(visible));

    let header = Row::new(
        [
            "State",
            "Crop Yield (kg/ha)",
            "Production (tonnes)",
            "Land Area (ha)",
            "Irrigation (%)",
            "Fertilizer (kg/ha)",
            "Mechanization (%)",
        ]
        .map(Cell::from),
    )
    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let body = rows.iter().skip(offset).take(visible).map(|region| {
        Row::new(vec![
            Cell::from(region.name.clone()),
            Cell::from(format_grouped(region.average_crop_yield)),
            Cell::from(format_grouped(region.total_production)),
            Cell::from(format_grouped(region.total_land_area)),
            Cell::from(format!("{}%", format_grouped(region.avg_irrigation_coverage))),
            Cell::from(format_grouped(region.avg_fertilizer_consumption)),
            Cell::from(format!("{}%", format_grouped(region.avg_mechanization_level))),
        ])
    });

    let table = Table::new(
        body,
        [
            Constraint::Length(16),
            Constraint::Length(19),
            Constraint::Length(20),
            Constraint::Length(15),
            Constraint::Length(15),
            Constraint::Length(19),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title("Agricultural Data Summary")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(table, area);

    if rows.len() > visible {
        let mut state = ScrollbarState::new(rows.len()).position(offset);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin::new(0, 1)),
            &mut state,
        );
    }
}

async fn fetch_snapshot(store: Rc<RefCell<Option<DashboardExport>>>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let Ok(request) = Request::new_with_str_and_init(SNAPSHOT_URL, &opts) else {
        return;
    };

    let Ok(response_value) =
        wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request)).await
    else {
        web_sys::console::error_1(&format!("Failed to fetch {SNAPSHOT_URL}").into());
        return;
    };

    let Ok(response) = response_value.dyn_into::<Response>() else {
        web_sys::console::error_1(&"Failed to read response".into());
        return;
    };

    let Ok(body) = response.json() else {
        web_sys::console::error_1(&format!("{SNAPSHOT_URL} has no JSON body").into());
        return;
    };

    let Ok(json) = wasm_bindgen_futures::JsFuture::from(body).await else {
        web_sys::console::error_1(&format!("Failed to read {SNAPSHOT_URL} body").into());
        return;
    };

    let data = match serde_wasm_bindgen::from_value::<DashboardExport>(json) {
        Ok(data) => data,
        Err(error) => {
            web_sys::console::error_1(&format!("Failed to parse {SNAPSHOT_URL}: {error}").into());
            return;
        }
    };

    *store.borrow_mut() = Some(data);
}
