//! Runtime configuration, read from the environment (`.env` honoured).

use crate::util::env::{env_opt, env_parse_strict, init_env};
use anyhow::Result;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CSV: &str = "vgsales.csv";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub host: String,
    pub port: u16,
    /// actix worker count; `None` keeps the actix default (one per core).
    pub workers: Option<usize>,
    pub csv_path: PathBuf,
    pub static_dir: PathBuf,
    /// Explicit plots directory; otherwise `<static_dir>/plots`.
    pub plots_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: None,
            csv_path: PathBuf::from(DEFAULT_CSV),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            plots_dir: None,
        }
    }
}

impl DashboardConfig {
    /// Read `DASHBOARD_HOST`, `DASHBOARD_PORT`, `DASHBOARD_WORKERS`,
    /// `VGSALES_CSV`, `STATIC_DIR` and `PLOTS_DIR`. Malformed numbers are errors.
    pub fn from_env() -> Result<Self> {
        init_env();
        let defaults = Self::default();
        Ok(Self {
            host: env_opt("DASHBOARD_HOST").unwrap_or(defaults.host),
            port: env_parse_strict("DASHBOARD_PORT")?.unwrap_or(defaults.port),
            workers: env_parse_strict("DASHBOARD_WORKERS")?,
            csv_path: env_opt("VGSALES_CSV")
                .map(PathBuf::from)
                .unwrap_or(defaults.csv_path),
            static_dir: env_opt("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            plots_dir: env_opt("PLOTS_DIR").map(PathBuf::from),
        })
    }

    pub fn plots_dir(&self) -> PathBuf {
        self.plots_dir
            .clone()
            .unwrap_or_else(|| self.static_dir.join("plots"))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plots_dir_follows_static_dir_unless_set() {
        let mut config = DashboardConfig {
            static_dir: PathBuf::from("/srv/assets"),
            ..DashboardConfig::default()
        };
        assert_eq!(config.plots_dir(), PathBuf::from("/srv/assets/plots"));
        config.plots_dir = Some(PathBuf::from("/tmp/plots"));
        assert_eq!(config.plots_dir(), PathBuf::from("/tmp/plots"));
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = DashboardConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    // Single test touches the process env so the cases cannot interleave.
    #[test]
    fn reads_and_validates_environment() {
        std::env::set_var("DASHBOARD_HOST", "127.0.0.1");
        std::env::set_var("DASHBOARD_PORT", "9000");
        std::env::set_var("VGSALES_CSV", "/data/vgsales.csv");
        let config = DashboardConfig::from_env().unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.csv_path, PathBuf::from("/data/vgsales.csv"));

        std::env::set_var("DASHBOARD_PORT", "eighty");
        let err = DashboardConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("DASHBOARD_PORT"), "{err}");

        for key in ["DASHBOARD_HOST", "DASHBOARD_PORT", "VGSALES_CSV"] {
            std::env::remove_var(key);
        }
    }
}
