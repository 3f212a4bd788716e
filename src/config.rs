use std::path::PathBuf;

use crate::data::aggregate::ChartOptions;

/// File read when neither a CLI argument nor the environment names one.
pub const DEFAULT_DATA_FILE: &str = "dados-imersao-final.csv";
/// Environment variable overriding the data file.
pub const DATA_ENV: &str = "SALARY_DASHBOARD_DATA";
/// Environment variable overriding the role charted per country.
pub const ROLE_ENV: &str = "SALARY_DASHBOARD_ROLE";
/// Environment variable overriding the histogram bin count.
pub const BINS_ENV: &str = "SALARY_DASHBOARD_BINS";

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Dataset loaded at startup.
    pub data_path: PathBuf,
    pub charts: ChartOptions,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            charts: ChartOptions::default(),
        }
    }
}

impl DashboardConfig {
    /// Resolve from the process arguments and environment.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::args().nth(1),
            std::env::var(DATA_ENV).ok(),
            std::env::var(ROLE_ENV).ok(),
            std::env::var(BINS_ENV).ok(),
        )
    }

    /// Data path precedence: argument, then environment, then default.
    pub fn resolve(
        arg: Option<String>,
        data_env: Option<String>,
        role_env: Option<String>,
        bins_env: Option<String>,
    ) -> Self {
        let mut config = Self::default();

        if let Some(path) = arg.or(data_env).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(role) = role_env.filter(|r| !r.trim().is_empty()) {
            config.charts.featured_role = role.trim().to_string();
        }
        if let Some(bins) = bins_env {
            match bins.trim().parse::<usize>() {
                Ok(n) => config.charts.histogram_bins = n.max(1),
                Err(e) => log::warn!("Ignoring {BINS_ENV}={bins:?}: {e}"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::FEATURED_ROLE;

    #[test]
    fn defaults_when_nothing_given() {
        let config = DashboardConfig::resolve(None, None, None, None);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.charts.featured_role, FEATURED_ROLE);
        assert_eq!(config.charts.histogram_bins, 30);
        assert_eq!(config.charts.top_roles, 10);
    }

    #[test]
    fn argument_beats_environment() {
        let config = DashboardConfig::resolve(
            Some("cli.csv".into()),
            Some("env.csv".into()),
            None,
            None,
        );
        assert_eq!(config.data_path, PathBuf::from("cli.csv"));

        let config = DashboardConfig::resolve(None, Some("env.parquet".into()), None, None);
        assert_eq!(config.data_path, PathBuf::from("env.parquet"));
    }

    #[test]
    fn role_override_is_trimmed() {
        let config = DashboardConfig::resolve(None, None, Some("  Data Engineer ".into()), None);
        assert_eq!(config.charts.featured_role, "Data Engineer");

        let config = DashboardConfig::resolve(None, None, Some("   ".into()), None);
        assert_eq!(config.charts.featured_role, FEATURED_ROLE);
    }

    #[test]
    fn bin_count_from_environment() {
        let config = DashboardConfig::resolve(None, None, None, Some(" 12 ".into()));
        assert_eq!(config.charts.histogram_bins, 12);

        let config = DashboardConfig::resolve(None, None, None, Some("0".into()));
        assert_eq!(config.charts.histogram_bins, 1);

        let config = DashboardConfig::resolve(None, None, None, Some("many".into()));
        assert_eq!(config.charts.histogram_bins, 30);
    }
}
