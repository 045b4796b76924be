use crate::analytics::DashboardView;
use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::config::AppConfig;
use crate::domain::Selection;
use crate::store::RegionStore;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::style::Color;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tachyonfx::{fx, Effect, Interpolation};

/// Number of chart tabs on the dashboard.
pub const CHART_TAB_COUNT: usize = 2;

const SELECTION_FADE_MS: u32 = 450;

/// State of the region dropdown.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectorState {
    pub open: bool,
    pub query: String,
    pub highlighted: usize,
}

pub struct App {
    pub running: bool,
    pub store: RegionStore,
    pub selection: Selection,
    pub selector: SelectorState,
    pub chart_tab_index: usize,
    pub table_offset: usize,
    pub show_help: bool,
    pub status_message: String,
    pub export_path: PathBuf,
    pub last_frame: Instant,
    pub last_tick: tachyonfx::Duration,
    pub selection_fx: Mutex<Option<Effect>>,
}

impl App {
    pub fn new(store: RegionStore, config: &AppConfig) -> Self {
        Self {
            running: true,
            store,
            selection: config.initial_selection.clone(),
            selector: SelectorState::default(),
            chart_tab_index: 0,
            table_offset: 0,
            show_help: false,
            status_message: String::new(),
            export_path: config.export_path.clone(),
            last_frame: Instant::now(),
            last_tick: tachyonfx::Duration::from_millis(0),
            selection_fx: Mutex::new(None),
        }
    }

    /// Advances frame timing and drops the selection effect once it has
    /// finished.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_tick = now.duration_since(self.last_frame).into();
        self.last_frame = now;

        if let Ok(mut effect) = self.selection_fx.lock() {
            if effect.as_ref().is_some_and(Effect::done) {
                *effect = None;
            }
        }
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::build(&self.store, &self.selection)
    }

    /// "All States" followed by every region, in store order.
    pub fn selection_options(&self) -> Vec<Selection> {
        std::iter::once(Selection::All)
            .chain(
                self.store
                    .names()
                    .map(|name| Selection::Region(name.to_string())),
            )
            .collect()
    }

    /// Dropdown options narrowed by the fuzzy query, best match first.
    pub fn visible_options(&self) -> Vec<Selection> {
        let options = self.selection_options();
        let query = self.selector.query.trim();
        if query.is_empty() {
            return options;
        }

        let matcher = SkimMatcherV2::default().ignore_case();
        let mut scored: Vec<(i64, Selection)> = options
            .into_iter()
            .filter_map(|option| {
                matcher
                    .fuzzy_match(option.label(), query)
                    .map(|score| (score, option))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, option)| option).collect()
    }

    /// Applies a selection. Only names present in the store are accepted.
    pub fn select(&mut self, selection: Selection) -> bool {
        if let Selection::Region(name) = &selection {
            if self.store.find(name).is_none() {
                log::warn!("ignoring selection of unknown region {name:?}");
                self.status_message = format!("Error: Unknown region: {name}");
                return false;
            }
        }

        if selection == self.selection {
            return true;
        }

        log::debug!(
            "selection changed from {:?} to {:?}",
            self.selection.label(),
            selection.label()
        );
        self.selection = selection;
        self.table_offset = 0;
        self.status_message = if self.selection.is_all() {
            "Showing all states".to_string()
        } else {
            format!("Showing {}", self.selection.label())
        };
        self.start_selection_fx();
        true
    }

    pub fn reset_selection(&mut self) {
        self.select(Selection::All);
    }

    pub fn cycle_selection(&mut self, forward: bool) {
        let options = self.selection_options();
        let current = options
            .iter()
            .position(|option| *option == self.selection)
            .unwrap_or(0);
        let next = if forward {
            wrap_increment(current, options.len())
        } else {
            wrap_decrement(current, options.len())
        };

        if let Some(option) = options.into_iter().nth(next) {
            self.select(option);
        }
    }

    pub fn open_selector(&mut self) {
        let highlighted = self
            .selection_options()
            .iter()
            .position(|option| *option == self.selection)
            .unwrap_or(0);

        self.selector = SelectorState {
            open: true,
            query: String::new(),
            highlighted,
        };
    }

    pub fn close_selector(&mut self) {
        self.selector = SelectorState::default();
    }

    pub fn push_selector_query(&mut self, ch: char) {
        self.selector.query.push(ch);
        self.selector.highlighted = 0;
    }

    pub fn pop_selector_query(&mut self) {
        self.selector.query.pop();
        self.selector.highlighted = 0;
    }

    pub fn move_selector(&mut self, forward: bool) {
        let len = self.visible_options().len();
        self.selector.highlighted = if forward {
            wrap_increment(self.selector.highlighted, len)
        } else {
            wrap_decrement(self.selector.highlighted, len)
        };
    }

    /// Picks the highlighted option and closes the dropdown. An empty
    /// filter result keeps the dropdown open.
    pub fn confirm_selector(&mut self) {
        let Some(option) = self
            .visible_options()
            .into_iter()
            .nth(self.selector.highlighted)
        else {
            self.status_message = "No state matches the filter".to_string();
            return;
        };

        self.close_selector();
        self.select(option);
    }

    pub fn next_chart_tab(&mut self) {
        self.chart_tab_index = wrap_increment(self.chart_tab_index, CHART_TAB_COUNT);
    }

    pub fn prev_chart_tab(&mut self) {
        self.chart_tab_index = wrap_decrement(self.chart_tab_index, CHART_TAB_COUNT);
    }

    /// Number of rows the data table currently shows.
    pub fn table_len(&self) -> usize {
        crate::analytics::filter_regions(&self.store, &self.selection).len()
    }

    pub fn scroll_table(&mut self, delta: isize) {
        let max_offset = self.table_len().saturating_sub(1);
        self.table_offset = self
            .table_offset
            .saturating_add_signed(delta)
            .min(max_offset);
    }

    pub fn scroll_table_to(&mut self, offset: usize) {
        self.table_offset = offset.min(self.table_len().saturating_sub(1));
    }

    fn start_selection_fx(&self) {
        if let Ok(mut effect) = self.selection_fx.lock() {
            *effect = Some(fx::fade_from_fg(
                Color::Black,
                (SELECTION_FADE_MS, Interpolation::QuadOut),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(RegionStore::seed(), &AppConfig::default())
    }

    #[test]
    fn starts_on_all_states() {
        let app = app();
        assert_eq!(app.selection, Selection::All);
        assert_eq!(app.view().regions.len(), 8);
    }

    #[test]
    fn options_lead_with_sentinel() {
        let options = app().selection_options();
        assert_eq!(options.len(), 9);
        assert_eq!(options[0], Selection::All);
        assert_eq!(options[2], Selection::Region("Punjab".into()));
    }

    #[test]
    fn select_rejects_unknown_region() {
        let mut app = app();
        assert!(!app.select(Selection::Region("Atlantis".into())));
        assert_eq!(app.selection, Selection::All);
        assert!(app.status_message.starts_with("Error"));
    }

    #[test]
    fn select_starts_fade_and_resets_scroll() {
        let mut app = app();
        app.table_offset = 4;
        assert!(app.select(Selection::Region("Punjab".into())));
        assert_eq!(app.table_offset, 0);
        assert!(app.selection_fx.lock().unwrap().is_some());
        assert_eq!(app.status_message, "Showing Punjab");
    }

    #[test]
    fn cycling_wraps_through_sentinel() {
        let mut app = app();
        app.cycle_selection(false);
        assert_eq!(app.selection, Selection::Region("Tamil Nadu".into()));
        app.cycle_selection(true);
        assert_eq!(app.selection, Selection::All);
        app.cycle_selection(true);
        assert_eq!(app.selection, Selection::Region("Maharashtra".into()));
    }

    #[test]
    fn fuzzy_query_narrows_options() {
        let mut app = app();
        app.open_selector();
        for ch in "bengal".chars() {
            app.push_selector_query(ch);
        }
        let visible = app.visible_options();
        assert_eq!(visible.first(), Some(&Selection::Region("West Bengal".into())));
        assert!(!visible.contains(&Selection::Region("Punjab".into())));
    }

    #[test]
    fn confirm_applies_highlighted_option() {
        let mut app = app();
        app.open_selector();
        app.move_selector(true);
        app.move_selector(true);
        app.confirm_selector();

        assert!(!app.selector.open);
        assert_eq!(app.selection, Selection::Region("Punjab".into()));
    }

    #[test]
    fn confirm_with_no_matches_keeps_dropdown_open() {
        let mut app = app();
        app.open_selector();
        for ch in "zzzz".chars() {
            app.push_selector_query(ch);
        }
        app.confirm_selector();

        assert!(app.selector.open);
        assert_eq!(app.selection, Selection::All);
    }

    #[test]
    fn table_scroll_is_clamped_to_rows() {
        let mut app = app();
        app.scroll_table(20);
        assert_eq!(app.table_offset, 7);
        app.scroll_table(-3);
        assert_eq!(app.table_offset, 4);

        app.select(Selection::Region("Gujarat".into()));
        app.scroll_table(5);
        assert_eq!(app.table_offset, 0);
    }
}
