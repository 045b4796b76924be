use crate::app::state::App;
use crossterm::event::KeyCode;

/// F1 (or `?` outside the dropdown) toggles help. While help is shown it
/// consumes every key; Esc closes it.
pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    let toggles = key == KeyCode::F(1) || (key == KeyCode::Char('?') && !app.selector.open);
    if toggles {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}
