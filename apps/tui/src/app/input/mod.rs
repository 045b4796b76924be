pub(crate) mod helpers;
mod dashboard;
mod help;
mod selector;

use crate::app::state::App;
use crossterm::event::KeyCode;

/// Routes a key press to the help overlay, the region dropdown or the
/// dashboard, in that order of precedence.
pub async fn handle_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if app.selector.open {
        selector::handle_selector_input(app, key);
        return;
    }

    dashboard::handle_dashboard_input(app, key).await;
}
