use crate::app::App;
use crate::domain::Selection;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// The region dropdown: a filter line over the matching options.
pub fn render_selector_popup(app: &App, f: &mut Frame<'_>) {
    let area = centered_rect(40, 60, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Select State ")
        .title_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let filter = Paragraph::new(TextLine::from(vec![
        Span::styled("Filter: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}_", app.selector.query),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    f.render_widget(filter, split[0]);

    let options = app.visible_options();
    if options.is_empty() {
        let paragraph = Paragraph::new("No matching states").style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, split[1]);
        return;
    }

    let items: Vec<ListItem<'_>> = options
        .iter()
        .map(|option| {
            let marker = if *option == app.selection { "● " } else { "  " };
            let style = match option {
                Selection::All => Style::default().fg(Color::Yellow),
                Selection::Region(_) => Style::default().fg(Color::White),
            };
            ListItem::new(TextLine::from(vec![
                Span::styled(marker, Style::default().fg(Color::Green)),
                Span::styled(option.label().to_string(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selector.highlighted));
    f.render_stateful_widget(list, split[1], &mut state);
}

pub fn render_help_popup(f: &mut Frame<'_>) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let entries = [
        ("s / Enter", "Open the state selector"),
        ("type", "Filter states while the selector is open"),
        ("[ / ]", "Previous / next state"),
        ("a / Esc", "Back to All States"),
        ("Left / Right", "Switch chart tab"),
        ("Up / Down, PgUp / PgDn", "Scroll the data table"),
        ("e", "Export dashboard.json for the web view"),
        ("F1 / ?", "Toggle this help"),
        ("q", "Quit"),
    ];

    let mut lines = vec![
        TextLine::from(Span::styled(
            "Keyboard shortcuts",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
    ];
    lines.extend(entries.iter().map(|(key, description)| {
        TextLine::from(vec![
            Span::styled(format!("{key:<24}"), key_style),
            Span::raw(*description),
        ])
    }));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
