use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::time::Duration;

use crate::analytics::{format_grouped, DashboardView};
use crate::app::{handle_input, App};
use crate::domain::Metric;
use crate::ui;

/// Run the application in headless mode (no UI)
pub fn run_headless(app: &App, json: bool) -> Result<()> {
    let view = app.view();

    if json {
        let json = serde_json::to_string_pretty(&view)?;
        println!("{json}");
    } else {
        print!("{}", headless_report(&view));
    }

    Ok(())
}

/// Plain-text rendition of the dashboard for pipes and scripts.
pub fn headless_report(view: &DashboardView) -> String {
    let mut lines = vec![
        String::new(),
        "Agricultural Performance Dashboard".to_string(),
        "==================================".to_string(),
        format!("Selection: {}", view.selection),
    ];

    if view.regions.is_empty() {
        lines.push(String::new());
        lines.push(format!("No data for {}", view.selection));
        return lines.join("\n") + "\n";
    }

    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.extend(
        view.kpis
            .iter()
            .map(|kpi| format!("- {}: {}", kpi.title, kpi.display)),
    );

    if !view.radar.is_empty() {
        lines.push(String::new());
        lines.push("Farming Practices (score / 100):".to_string());
        lines.extend(view.radar.iter().map(|axis| {
            format!("- {}: {}", axis.subject, format_grouped(axis.score.round()))
        }));
    }

    lines.push(String::new());
    lines.push("States:".to_string());
    lines.extend(view.regions.iter().map(|record| {
        format!(
            "- {} | {} {} | {} {} | {} {}",
            record.name,
            format_grouped(Metric::AverageCropYield.value(record)),
            Metric::AverageCropYield.unit(),
            format_grouped(Metric::TotalProduction.value(record)),
            Metric::TotalProduction.unit(),
            format_grouped(Metric::TotalLandArea.value(record)),
            Metric::TotalLandArea.unit(),
        )
    }));

    lines.join("\n") + "\n"
}

/// Run the main application event loop
pub async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    while app.running {
        app.update();

        terminal
            .draw(|f| ui::ui(app, f))
            .map_err(|e| eyre!("Terminal draw error: {e}"))?;

        if !matches!(event::poll(tick_rate), Ok(true)) {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                handle_input(app, key.code).await;
            }
            Ok(Event::Resize(width, height)) => {
                log::debug!("terminal resized to {width}x{height}");
            }
            Ok(_) => {}
            Err(e) => log::warn!("failed to read terminal event: {e}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Selection;
    use crate::store::RegionStore;

    #[test]
    fn report_lists_summary_and_states() {
        let view = DashboardView::build(&RegionStore::seed(), &Selection::All);
        let report = headless_report(&view);

        assert!(report.contains("Selection: All States"));
        assert!(report.contains("- Avg Crop Yield (All): 2,988 kg/ha"));
        assert!(report.contains("- Punjab | 3,950 kg/ha | 142,000 tonnes | 36,000 ha"));
        assert!(!report.contains("Farming Practices"));
        assert!(report.ends_with("- Tamil Nadu | 2,950 kg/ha | 110,000 tonnes | 37,000 ha\n"));
    }

    #[test]
    fn single_state_report_includes_practices() {
        let view = DashboardView::build(
            &RegionStore::seed(),
            &Selection::Region("Punjab".into()),
        );
        let report = headless_report(&view);

        assert!(report.contains("Farming Practices"));
        assert!(report.contains("- Fertilizer: 84"));
    }

    #[test]
    fn unknown_state_report_says_so() {
        let view = DashboardView::build(
            &RegionStore::seed(),
            &Selection::Region("Atlantis".into()),
        );
        assert!(headless_report(&view).contains("No data for Atlantis"));
    }
}
