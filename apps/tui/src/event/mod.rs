mod loop_handler;

pub use loop_handler::{headless_report, run, run_headless};
