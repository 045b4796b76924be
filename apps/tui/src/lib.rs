// Modules shared by the binary and the integration tests
pub mod analytics;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod event;
pub mod export;
pub mod logging;
pub mod store;
pub mod terminal;
pub mod ui;

pub use domain::{RegionRecord, Selection, ALL_STATES_LABEL};
pub use store::RegionStore;
