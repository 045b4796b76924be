use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_selector_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.close_selector(),
        KeyCode::Enter => app.confirm_selector(),
        KeyCode::Up => app.move_selector(false),
        KeyCode::Down | KeyCode::Tab => app.move_selector(true),
        KeyCode::Backspace => app.pop_selector_query(),
        KeyCode::Char(ch) => app.push_selector_query(ch),
        _ => {}
    }
}
