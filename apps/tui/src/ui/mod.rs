// Dashboard rendering: the main screen plus the selector and help overlays.

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let view = app.view();
    screens::dashboard::render_dashboard(app, &view, f);

    if app.selector.open {
        widgets::popup::render_selector_popup(app, f);
    }
    if app.show_help {
        widgets::popup::render_help_popup(f);
    }
}
