use agri_dashboard::app::{handle_input, App};
use agri_dashboard::config::AppConfig;
use agri_dashboard::domain::Selection;
use agri_dashboard::store::RegionStore;
use agri_dashboard::ui;
use crossterm::event::KeyCode;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn screen_text(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(160, 50)).expect("test terminal");
    terminal.draw(|f| ui::ui(app, f)).expect("draw");

    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

async fn press_all(app: &mut App, keys: impl IntoIterator<Item = KeyCode>) {
    for key in keys {
        handle_input(app, key).await;
    }
}

#[test]
fn all_states_view_shows_aggregates() {
    let app = App::new(RegionStore::seed(), &AppConfig::default());
    let screen = screen_text(&app);

    assert!(screen.contains("Agricultural Performance Dashboard"));
    assert!(screen.contains("All States"));
    assert!(screen.contains("2,988 kg/ha"));
    assert!(screen.contains("1,281,500 tonnes"));
    assert!(screen.contains("57%"));
    assert!(screen.contains("Last updated: May 18, 2025"));
}

#[tokio::test]
async fn selecting_a_state_through_the_dropdown_updates_cards() {
    let mut app = App::new(RegionStore::seed(), &AppConfig::default());

    press_all(&mut app, [KeyCode::Char('s')]).await;
    assert!(screen_text(&app).contains("Select State"));

    press_all(&mut app, "punjab".chars().map(KeyCode::Char)).await;
    press_all(&mut app, [KeyCode::Enter]).await;

    assert_eq!(app.selection, Selection::Region("Punjab".into()));
    let screen = screen_text(&app);
    assert!(screen.contains("3,950 kg/ha"));
    assert!(screen.contains("142,000 tonnes"));
    assert!(screen.contains("650 mm"));
    assert!(screen.contains("Agricultural Data Summary - Punjab"));
}

#[tokio::test]
async fn practices_tab_shows_placeholder_until_a_state_is_picked() {
    let mut app = App::new(RegionStore::seed(), &AppConfig::default());
    press_all(&mut app, [KeyCode::Right]).await;

    let screen = screen_text(&app);
    assert!(screen.contains("Fertilizer Impact on Yield"));
    assert!(screen.contains("Select a State to View Practices"));

    press_all(&mut app, [KeyCode::Char(']'), KeyCode::Char(']')]).await;
    assert_eq!(app.selection, Selection::Region("Punjab".into()));
    assert!(screen_text(&app).contains("Punjab Farming Practices"));

    press_all(&mut app, [KeyCode::Char('a')]).await;
    assert_eq!(app.selection, Selection::All);
}

#[tokio::test]
async fn help_overlay_swallows_keys_until_closed() {
    let mut app = App::new(RegionStore::seed(), &AppConfig::default());

    press_all(&mut app, [KeyCode::F(1), KeyCode::Char(']')]).await;
    assert!(app.show_help);
    assert_eq!(app.selection, Selection::All);
    assert!(screen_text(&app).contains("Keyboard shortcuts"));

    press_all(&mut app, [KeyCode::Esc]).await;
    assert!(!app.show_help);
}
