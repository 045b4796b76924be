use crate::domain::Selection;
use crate::store::RegionStore;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_EXPORT_PATH: &str = "dashboard.json";
const DEFAULT_TICK_MS: u64 = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid DASHBOARD_TICK_MS value {0:?}: expected a positive number of milliseconds")]
    InvalidTickRate(String),
    #[error("unknown region {name:?}; expected \"All States\" or one of: {known}")]
    UnknownRegion { name: String, known: String },
}

/// Runtime settings, resolved from `.env`, the environment and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub initial_selection: Selection,
    pub export_path: PathBuf,
    pub tick_rate: Duration,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_selection: Selection::All,
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            tick_rate: Duration::from_millis(DEFAULT_TICK_MS),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Builds a config from a key lookup so tests don't have to touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(region) = lookup("DASHBOARD_REGION") {
            config.initial_selection = Selection::parse(&region);
        }

        if let Some(path) = lookup("DASHBOARD_EXPORT").filter(|path| !path.trim().is_empty()) {
            config.export_path = PathBuf::from(path.trim());
        }

        if let Some(raw) = lookup("DASHBOARD_TICK_MS") {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|millis| *millis > 0)
                .ok_or_else(|| ConfigError::InvalidTickRate(raw.clone()))?;
            config.tick_rate = Duration::from_millis(millis);
        }

        config.debug = lookup("DEBUG").is_some_and(|value| is_truthy(&value));

        Ok(config)
    }

    /// The initial selection must name a region that exists.
    pub fn validate_against(&self, store: &RegionStore) -> Result<(), ConfigError> {
        match &self.initial_selection {
            Selection::All => Ok(()),
            Selection::Region(name) if store.find(name).is_some() => Ok(()),
            Selection::Region(name) => Err(ConfigError::UnknownRegion {
                name: name.clone(),
                known: store.names().collect::<Vec<_>>().join(", "),
            }),
        }
    }
}

/// Loads `.env` (if present) and reads the dashboard settings from the
/// environment.
pub fn init_app_config() -> Result<AppConfig, ConfigError> {
    dotenv().ok();
    AppConfig::from_lookup(|key| env::var(key).ok())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.export_path, PathBuf::from("dashboard.json"));
        assert_eq!(config.tick_rate, Duration::from_millis(50));
    }

    #[test]
    fn reads_all_known_keys() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DASHBOARD_REGION", "Punjab"),
            ("DASHBOARD_EXPORT", "out/agri.json"),
            ("DASHBOARD_TICK_MS", "120"),
            ("DEBUG", "1"),
        ]))
        .unwrap();

        assert_eq!(config.initial_selection, Selection::Region("Punjab".into()));
        assert_eq!(config.export_path, PathBuf::from("out/agri.json"));
        assert_eq!(config.tick_rate, Duration::from_millis(120));
        assert!(config.debug);
    }

    #[test]
    fn rejects_bad_tick_rate() {
        let result = AppConfig::from_lookup(lookup_from(&[("DASHBOARD_TICK_MS", "0")]));
        assert_eq!(result, Err(ConfigError::InvalidTickRate("0".into())));

        let result = AppConfig::from_lookup(lookup_from(&[("DASHBOARD_TICK_MS", "fast")]));
        assert!(matches!(result, Err(ConfigError::InvalidTickRate(_))));
    }

    #[test]
    fn validation_rejects_unknown_region() {
        let store = RegionStore::seed();
        let config = AppConfig {
            initial_selection: Selection::Region("Kerala".into()),
            ..AppConfig::default()
        };

        let error = config.validate_against(&store).unwrap_err();
        assert!(matches!(error, ConfigError::UnknownRegion { ref name, .. } if name == "Kerala"));
        assert!(error.to_string().contains("Tamil Nadu"));
    }

    #[test]
    fn validation_accepts_sentinel_and_known_region() {
        let store = RegionStore::seed();
        assert!(AppConfig::default().validate_against(&store).is_ok());

        let config = AppConfig {
            initial_selection: Selection::Region("West Bengal".into()),
            ..AppConfig::default()
        };
        assert!(config.validate_against(&store).is_ok());
    }
}
