use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::collection::{Limits, Pacing};

/// Stats dashboard backend: collects CS2 match data from HLTV and serves
/// aggregated statistics.
#[derive(Debug, Clone, clap::Parser)]
#[command(version, about)]
pub struct Config {
    /// Postgres connection url, keeps everything in memory when unset
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long, env = "DATABASE_POOL_SIZE", default_value_t = 8)]
    pub database_pool_size: usize,

    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Base url of the HLTV JSON bridge
    #[arg(long, env = "HLTV_API_URL", default_value = "http://localhost:8080/")]
    pub hltv_api_url: String,

    /// Static files of the dashboard frontend
    #[arg(long, env = "DASHBOARD_DIR", default_value = "frontend/dist/")]
    pub dashboard_dir: PathBuf,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: tracing::Level,

    /// Number of ranked teams stored by a team fetch
    #[arg(long, default_value_t = 30)]
    pub top_teams: usize,

    #[arg(long, default_value_t = 50)]
    pub matches_per_team: usize,

    /// Minimum interval between two provider requests
    #[arg(long, default_value_t = 3000)]
    pub request_interval_ms: u64,

    #[arg(long, default_value_t = 1000)]
    pub team_delay_ms: u64,

    #[arg(long, default_value_t = 2000)]
    pub match_delay_ms: u64,

    #[arg(long, default_value_t = 5000)]
    pub between_teams_ms: u64,
}

impl Config {
    pub fn pacing(&self) -> Pacing {
        Pacing {
            request_interval: Duration::from_millis(self.request_interval_ms),
            team_delay: Duration::from_millis(self.team_delay_ms),
            match_delay: Duration::from_millis(self.match_delay_ms),
            between_teams: Duration::from_millis(self.between_teams_ms),
        }
    }

    pub fn limits(&self) -> Limits {
        Limits {
            top_teams: self.top_teams,
            matches_per_team: self.matches_per_team,
        }
    }
}
