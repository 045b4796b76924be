use crate::analytics::{format_grouped, DashboardView};
use crate::domain::ALL_STATES_LABEL;
use crate::ui::widgets::charts::region_color;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
};
use ratatui::Frame;

const HEADERS: [&str; 7] = [
    "State",
    "Crop Yield (kg/ha)",
    "Production (tonnes)",
    "Land Area (ha)",
    "Irrigation (%)",
    "Fertilizer (kg/ha)",
    "Mechanization (%)",
];

/// First row to draw so that `offset` stays within a window of
/// `max_visible_rows`.
pub const fn scroll_offset(total_rows: usize, max_visible_rows: usize, offset: usize) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    let last_start = total_rows - max_visible_rows;
    if offset > last_start {
        last_start
    } else {
        offset
    }
}

/// Rows the table needs, borders and header included.
pub fn table_height(rows: usize) -> u16 {
    u16::try_from(rows.clamp(1, 8)).unwrap_or(8) + 3
}

pub fn render_region_table(view: &DashboardView, table_offset: usize, f: &mut Frame<'_>, area: Rect) {
    let title = if view.selection != ALL_STATES_LABEL {
        format!("Agricultural Data Summary - {}", view.selection)
    } else {
        "Agricultural Data Summary".to_string()
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    if view.regions.is_empty() {
        let paragraph = Paragraph::new(format!("No data for {}", view.selection))
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(HEADERS.iter().map(|title| Cell::from(*title))).style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    );

    let max_visible_rows = usize::from(area.height.saturating_sub(3));
    let offset = scroll_offset(view.regions.len(), max_visible_rows, table_offset);

    let rows = view
        .regions
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, record)| {
            let background = if index % 2 == 0 {
                Color::Reset
            } else {
                Color::Rgb(40, 40, 40)
            };

            Row::new(vec![
                Cell::from(record.name.clone()).style(
                    Style::default()
                        .fg(region_color(index))
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::from(format_grouped(record.average_crop_yield)),
                Cell::from(format_grouped(record.total_production)),
                Cell::from(format_grouped(record.total_land_area)),
                Cell::from(format!("{}%", format_grouped(record.avg_irrigation_coverage))),
                Cell::from(format_grouped(record.avg_fertilizer_consumption)),
                Cell::from(format!("{}%", format_grouped(record.avg_mechanization_level))),
            ])
            .style(Style::default().fg(Color::White).bg(background))
        });

    let widths = [
        Constraint::Length(16),
        Constraint::Length(19),
        Constraint::Length(20),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(19),
        Constraint::Length(18),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);

    if view.regions.len() > max_visible_rows {
        let mut scrollbar_state = ScrollbarState::new(view.regions.len())
            .position(offset)
            .viewport_content_length(max_visible_rows);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_style(Style::default().fg(Color::Green));
        let scroll_area = Rect {
            x: area.x,
            y: area.y.saturating_add(2),
            width: area.width,
            height: area.height.saturating_sub(3),
        };
        f.render_stateful_widget(scrollbar, scroll_area, &mut scrollbar_state);
    }
}
