use crate::analytics::Kpi;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_kpi_cards(kpis: &[Kpi], selection: &str, f: &mut Frame<'_>, area: Rect) {
    if kpis.is_empty() {
        let paragraph = Paragraph::new(format!("No figures available for {selection}"))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            )
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let count = u32::try_from(kpis.len()).unwrap_or(1);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(kpis.iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (kpi, card_area) in kpis.iter().zip(cards.iter()) {
        let block = Block::default()
            .title(kpi.title)
            .title_style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let value = Paragraph::new(Text::from(TextLine::styled(
            kpi.display.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .block(block)
        .alignment(Alignment::Center);

        f.render_widget(value, *card_area);
    }
}
