use crate::app::state::App;
use crate::export::write_export;
use crossterm::event::KeyCode;

const PAGE_ROWS: isize = 5;

pub async fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('s') | KeyCode::Enter => {
            app.open_selector();
        }
        KeyCode::Char(']') => app.cycle_selection(true),
        KeyCode::Char('[') => app.cycle_selection(false),
        KeyCode::Char('a') | KeyCode::Esc => app.reset_selection(),
        KeyCode::Right => app.next_chart_tab(),
        KeyCode::Left => app.prev_chart_tab(),
        KeyCode::Up => app.scroll_table(-1),
        KeyCode::Down => app.scroll_table(1),
        KeyCode::PageUp => app.scroll_table(-PAGE_ROWS),
        KeyCode::PageDown => app.scroll_table(PAGE_ROWS),
        KeyCode::Home => app.scroll_table_to(0),
        KeyCode::End => app.scroll_table_to(usize::MAX),
        KeyCode::Char('e') => handle_export(app).await,
        _ => {}
    }
}

async fn handle_export(app: &mut App) {
    let path = app.export_path.clone();
    match write_export(&app.store, &path).await {
        Ok(written) => {
            app.status_message = format!("Exported dashboard to {}", written.display());
        }
        Err(e) => {
            log::error!("export failed: {e}");
            app.status_message = format!("Error: {e}");
        }
    }
}
