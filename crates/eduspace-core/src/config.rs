// ── Runtime console configuration ──
//
// Plain values the console runs with. Core never reads files; the
// config crate (or a test) builds a `ConsoleConfig` and hands it in.

use std::time::Duration;

/// Artificial delay applied by the in-memory backend before each call resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    /// Delay for `list` and `get`.
    pub read: Duration,
    /// Delay for `create`, `update` and `delete`.
    pub write: Duration,
    /// Delay for `login` and `register`.
    pub auth: Duration,
}

impl LatencyConfig {
    /// No artificial delay at all.
    pub const fn none() -> Self {
        Self {
            read: Duration::ZERO,
            write: Duration::ZERO,
            auth: Duration::ZERO,
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(500),
            write: Duration::from_millis(500),
            auth: Duration::from_millis(800),
        }
    }
}

/// Everything the headless console needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub latency: LatencyConfig,
    /// How long a notification stays visible.
    pub notification_ttl: Duration,
    /// Start with the demo departments, people and admin account.
    pub seed_demo_data: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            latency: LatencyConfig::default(),
            notification_ttl: Duration::from_secs(5),
            seed_demo_data: true,
        }
    }
}
