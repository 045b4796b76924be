use chrono::{DateTime, Utc};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: StderrLogger = StderrLogger;

/// Timestamped logger writing to stderr. The threshold is whatever
/// `log::max_level()` is set to.
pub struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(Utc::now(), record));
        }
    }

    fn flush(&self) {}
}

pub const fn level_for(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

pub fn init(debug: bool) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level_for(debug));
    Ok(())
}

fn format_record(now: DateTime<Utc>, record: &Record<'_>) -> String {
    format!(
        "[{}] {} {} - {}",
        now.to_rfc3339(),
        record.level(),
        record.target(),
        record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use log::Level;

    #[test]
    fn debug_flag_raises_verbosity() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Warn);
    }

    #[test]
    fn second_init_reports_an_error() {
        let _ = init(false);
        let err = init(false).unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn record_line_carries_timestamp_level_and_target() {
        let now = Utc.with_ymd_and_hms(2025, 5, 18, 9, 30, 0).unwrap();
        let line = format_record(
            now,
            &Record::builder()
                .args(format_args!("selection changed to Punjab"))
                .level(Level::Info)
                .target("agri_dashboard::app")
                .build(),
        );

        assert_eq!(
            line,
            "[2025-05-18T09:30:00+00:00] INFO agri_dashboard::app - selection changed to Punjab"
        );
    }
}
