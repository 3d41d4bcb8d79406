use std::time::Instant;

use crate::bootstrap::config::Config;

/// Shared router state: immutable configuration plus the process start
/// instant for uptime reporting.
#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    started_at: Instant,
}

impl AppContext {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
