use crate::analytics::DashboardView;
use crate::app::App;
use crate::store::DATA_AS_OF;
use crate::ui::widgets::charts::{render_chart_panel, render_chart_tabs};
use crate::ui::widgets::kpis::render_kpi_cards;
use crate::ui::widgets::tables::{render_region_table, table_height};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tachyonfx::EffectRenderer;

pub fn render_dashboard(app: &App, view: &DashboardView, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                               // Header
            Constraint::Length(3),                               // KPI cards
            Constraint::Length(1),                               // Chart tabs
            Constraint::Min(8),                                  // Charts
            Constraint::Length(table_height(view.regions.len())), // Data table
            Constraint::Length(1),                               // Status
            Constraint::Length(1),                               // Shortcuts
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_header(view, f, layout[0]);
    render_kpi_cards(&view.kpis, &view.selection, f, layout[1]);

    if let Ok(mut effect) = app.selection_fx.lock() {
        if let Some(effect) = effect.as_mut() {
            f.buffer_mut()
                .render_effect(effect, layout[1], app.last_tick);
        }
    }

    render_chart_tabs(app.chart_tab_index, f, layout[2]);
    render_chart_panel(view, app.chart_tab_index, f, layout[3]);
    render_region_table(view, app.table_offset, f, layout[4]);
    render_status(app, f, layout[5]);
    render_shortcuts(f, layout[6]);
}

fn render_header(view: &DashboardView, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let header = Paragraph::new(Text::from(TextLine::from(vec![
        Span::styled(
            "Agricultural Performance Dashboard",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Selected: ", Style::default().fg(Color::Gray)),
        Span::styled(
            view.selection.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ])))
    .block(block)
    .alignment(Alignment::Center);

    f.render_widget(header, area);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status = Paragraph::new(Span::styled(app.status_message.as_str(), style));
    f.render_widget(status, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let hint = Style::default().fg(Color::Gray);

    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(30)])
        .split(area);

    let shortcuts = Paragraph::new(TextLine::from(vec![
        Span::styled("s", key),
        Span::styled(" select  ", hint),
        Span::styled("[ ]", key),
        Span::styled(" cycle  ", hint),
        Span::styled("a", key),
        Span::styled(" all  ", hint),
        Span::styled("←/→", key),
        Span::styled(" charts  ", hint),
        Span::styled("e", key),
        Span::styled(" export  ", hint),
        Span::styled("?", key),
        Span::styled(" help  ", hint),
        Span::styled("q", key),
        Span::styled(" quit", hint),
    ]));
    f.render_widget(shortcuts, split[0]);

    let updated = Paragraph::new(Span::styled(
        format!("Last updated: {DATA_AS_OF}"),
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Right);
    f.render_widget(updated, split[1]);
}
