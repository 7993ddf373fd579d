//! Editor configuration.
//!
//! All knobs have defaults matching a classic 80x24 terminal session. Hosts may overlay a few of
//! them from environment variables (`KILO_TAB_STOP`, `KILO_QUIT_TIMES`).

use std::time::Duration;

/// Default tab stop (in cells) used when expanding `'\t'` for display.
pub const DEFAULT_TAB_STOP: usize = 4;
/// Number of extra `Quit` commands required to leave with unsaved changes.
pub const DEFAULT_QUIT_TIMES: u8 = 3;
/// How long a status message stays visible.
pub const DEFAULT_STATUS_TIMEOUT: Duration = Duration::from_secs(5);
/// Maximum status message length in bytes.
pub const DEFAULT_STATUS_CAPACITY: usize = 80;
/// Maximum find query length in bytes.
pub const DEFAULT_QUERY_CAPACITY: usize = 256;

/// Environment variable overriding [`EditorConfig::tab_stop`].
pub const ENV_TAB_STOP: &str = "KILO_TAB_STOP";
/// Environment variable overriding [`EditorConfig::quit_times`].
pub const ENV_QUIT_TIMES: &str = "KILO_QUIT_TIMES";

/// Configuration of an [`Editor`](crate::Editor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Tab stop (in cells). Always at least 1.
    pub tab_stop: usize,
    /// Extra `Quit` commands required when the buffer is dirty.
    pub quit_times: u8,
    /// Lifetime of a status message.
    pub status_timeout: Duration,
    /// Status message capacity in bytes; longer messages are truncated.
    pub status_capacity: usize,
    /// Find query capacity in bytes; further input is ignored.
    pub query_capacity: usize,
    /// Height of the text area (rows), excluding the status and message bars.
    pub screen_rows: usize,
    /// Width of the text area (columns).
    pub screen_cols: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            quit_times: DEFAULT_QUIT_TIMES,
            status_timeout: DEFAULT_STATUS_TIMEOUT,
            status_capacity: DEFAULT_STATUS_CAPACITY,
            query_capacity: DEFAULT_QUERY_CAPACITY,
            screen_rows: 22,
            screen_cols: 80,
        }
    }
}

impl EditorConfig {
    /// Set the text area size.
    pub fn with_screen_size(mut self, rows: usize, cols: usize) -> Self {
        self.screen_rows = rows.max(1);
        self.screen_cols = cols.max(1);
        self
    }

    /// Set the tab stop.
    pub fn with_tab_stop(mut self, tab_stop: usize) -> Self {
        self.tab_stop = tab_stop.max(1);
        self
    }

    /// Set the number of extra quit confirmations.
    pub fn with_quit_times(mut self, quit_times: u8) -> Self {
        self.quit_times = quit_times;
        self
    }

    /// Set the status message timeout.
    pub fn with_status_timeout(mut self, timeout: Duration) -> Self {
        self.status_timeout = timeout;
        self
    }

    /// Overlay values read through `lookup` (e.g. an environment map).
    ///
    /// Unparsable or out-of-range values are ignored.
    pub fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(tab_stop) = lookup(ENV_TAB_STOP)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&v| v > 0)
        {
            self.tab_stop = tab_stop;
        }
        if let Some(quit_times) = lookup(ENV_QUIT_TIMES).and_then(|v| v.trim().parse::<u8>().ok())
        {
            self.quit_times = quit_times;
        }
        self
    }

    /// Overlay values from the process environment.
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_with_vars_overrides_and_ignores_invalid() {
        let vars: HashMap<&str, &str> = [(ENV_TAB_STOP, " 8 "), (ENV_QUIT_TIMES, "many")]
            .into_iter()
            .collect();
        let config =
            EditorConfig::default().with_vars(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.tab_stop, 8);
        assert_eq!(config.quit_times, DEFAULT_QUIT_TIMES);
    }

    #[test]
    fn test_zero_tab_stop_is_rejected() {
        let config = EditorConfig::default().with_vars(|k| (k == ENV_TAB_STOP).then(|| "0".into()));
        assert_eq!(config.tab_stop, DEFAULT_TAB_STOP);
        assert_eq!(EditorConfig::default().with_tab_stop(0).tab_stop, 1);
    }

    #[test]
    fn test_screen_size_is_at_least_one_cell() {
        let config = EditorConfig::default().with_screen_size(0, 0);
        assert_eq!((config.screen_rows, config.screen_cols), (1, 1));
    }
}
