use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::refresh::DEFAULT_REFRESH_SECS;

/// Runtime configuration, from the command line or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "dsi-dashboard")]
#[command(about = "Tableau de bord DSI : métriques, graphiques et actions sur les tickets")]
pub struct AppConfig {
    /// Base URL of the ticketing backend
    #[arg(long, env = "DSI_API_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "DSI_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// SQLite file holding local settings
    #[arg(long, env = "DSI_SETTINGS_DB", default_value = "dsi_dashboard.db")]
    pub db_path: PathBuf,

    /// Seconds between two refreshes
    #[arg(long, default_value_t = DEFAULT_REFRESH_SECS)]
    pub refresh_secs: u64,

    /// Load once, print the dashboard and exit
    #[arg(long)]
    pub once: bool,
}

impl AppConfig {
    /// Zero is bumped to one second; `tokio::time::interval` panics on zero.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::try_parse_from(["dsi-dashboard"]).unwrap();
        assert_eq!(config.refresh_secs, 30);
        assert!(!config.once);
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_explicit_flags() {
        let config = AppConfig::try_parse_from([
            "dsi-dashboard",
            "--base-url",
            "http://dsi.local/api/",
            "--token",
            "abc",
            "--db-path",
            "/tmp/dsi.db",
            "--refresh-secs",
            "0",
            "--once",
        ])
        .unwrap();
        assert_eq!(config.base_url, "http://dsi.local/api/");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.db_path, PathBuf::from("/tmp/dsi.db"));
        assert!(config.once);
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }
}
