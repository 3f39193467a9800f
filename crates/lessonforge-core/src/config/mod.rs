//! Core configuration
//!
//! Policy knobs for the lifecycle services. Defaults match the reference
//! deployment; everything is overridable through the builder-style setters.

use chrono::Duration;

/// Default number of days a trashed record stays restorable
const DEFAULT_TRASH_RETENTION_DAYS: i64 = 30;

/// Configuration for the lifecycle core
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// How long trashed records remain restorable before the expiry sweep
    /// may remove them
    pub trash_retention_days: i64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            trash_retention_days: DEFAULT_TRASH_RETENTION_DAYS,
        }
    }
}

impl CoreConfig {
    /// Set the trash retention window in days
    pub fn trash_retention_days(mut self, days: i64) -> Self {
        self.trash_retention_days = days;
        self
    }

    /// Retention window as a chrono duration
    pub fn trash_retention(&self) -> Duration {
        Duration::days(self.trash_retention_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retention_is_thirty_days() {
        let config = CoreConfig::default();
        assert_eq!(config.trash_retention_days, 30);
        assert_eq!(config.trash_retention(), Duration::days(30));
    }

    #[test]
    fn test_builder_override() {
        let config = CoreConfig::default().trash_retention_days(7);
        assert_eq!(config.trash_retention(), Duration::days(7));
    }
}
