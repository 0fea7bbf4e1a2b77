use serde::{Deserialize, Serialize};

/// Configuration from dayplan.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agenda: AgendaConfig,
    #[serde(default)]
    pub filters: FilterConfig,
}

/// Agenda window sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaConfig {
    /// Days materialized when the agenda opens (today plus the following days).
    #[serde(default = "default_initial_days")]
    pub initial_days: i64,
    /// Days added per expand operation, in either direction.
    #[serde(default = "default_expand_step")]
    pub expand_step: i64,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            initial_days: default_initial_days(),
            expand_step: default_expand_step(),
        }
    }
}

/// Which item kinds the agenda shows by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_true")]
    pub tasks: bool,
    #[serde(default = "default_true")]
    pub events: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            tasks: true,
            events: true,
        }
    }
}

fn default_initial_days() -> i64 {
    20
}

fn default_expand_step() -> i64 {
    5
}

fn default_true() -> bool {
    true
}
