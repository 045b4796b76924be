use crate::config::AppConfig;
use crate::domain::Selection;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "agri-dashboard",
    version,
    about = "Agricultural Performance Dashboard"
)]
pub struct CliArgs {
    /// Print the dashboard as a text report and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Initial selection: a state name or "All States"
    #[arg(long, value_name = "NAME")]
    pub region: Option<String>,

    /// Write the dashboard snapshot as JSON and exit
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "")]
    pub export: Option<String>,
}

impl CliArgs {
    /// Flags win over environment values.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(region) = &self.region {
            config.initial_selection = Selection::parse(region);
        }
        if let Some(path) = self.export.as_deref().filter(|path| !path.trim().is_empty()) {
            config.export_path = PathBuf::from(path.trim());
        }
        if self.debug {
            config.debug = true;
        }
    }

    pub const fn wants_export(&self) -> bool {
        self.export.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = CliArgs::parse_from([
            "agri-dashboard",
            "--region",
            "Gujarat",
            "--export",
            "snapshots/today.json",
            "--debug",
        ]);
        let mut config = AppConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.initial_selection, Selection::Region("Gujarat".into()));
        assert_eq!(config.export_path, PathBuf::from("snapshots/today.json"));
        assert!(config.debug);
        assert!(args.wants_export());
    }

    #[test]
    fn bare_export_flag_keeps_configured_path() {
        let args = CliArgs::parse_from(["agri-dashboard", "--export"]);
        let mut config = AppConfig::default();
        args.apply_overrides(&mut config);

        assert!(args.wants_export());
        assert_eq!(config.export_path, PathBuf::from("dashboard.json"));
    }

    #[test]
    fn no_flags_leave_config_untouched() {
        let args = CliArgs::parse_from(["agri-dashboard"]);
        let mut config = AppConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config, AppConfig::default());
        assert!(!args.wants_export());
    }
}
