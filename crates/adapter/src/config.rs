//! Adapter configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for the payment bridge and the persistence/log sinks
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterConfig {
    /// Cancel every power-up request without contacting a gateway
    pub payments_disabled: bool,
    /// Latency of the simulated gateway
    pub payment_delay: Duration,
    /// Give up on a confirmation after this long
    pub payment_timeout: Duration,
    /// Whether the simulated gateway approves or declines
    pub auto_approve: bool,
    pub highscore_path: PathBuf,
    /// JSON-lines event log; None disables it
    pub log_path: Option<PathBuf>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            payments_disabled: false,
            payment_delay: Duration::from_millis(1500),
            payment_timeout: Duration::from_millis(30_000),
            auto_approve: true,
            highscore_path: PathBuf::from("neon_tetris_highscore.json"),
            log_path: None,
        }
    }
}

impl AdapterConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let payment_delay = env::var("NEON_TETRIS_PAYMENT_DELAY_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.payment_delay);

        let payment_timeout = env::var("NEON_TETRIS_PAYMENT_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.payment_timeout);

        let auto_approve = env::var("NEON_TETRIS_PAYMENT_AUTO_APPROVE")
            .ok()
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.auto_approve);

        let highscore_path = env::var("NEON_TETRIS_HIGHSCORE_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.highscore_path);

        let log_path = env::var("NEON_TETRIS_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            payments_disabled: Self::is_disabled(),
            payment_delay,
            payment_timeout,
            auto_approve,
            highscore_path,
            log_path,
        }
    }

    /// Check if payments are disabled via environment
    pub fn is_disabled() -> bool {
        std::env::var("NEON_TETRIS_PAYMENTS_DISABLED")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(false)
    }
}

/// "1"/"true"/"yes" or "0"/"false"/"no", case-insensitive
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdapterConfig::default();
        assert!(!config.payments_disabled);
        assert_eq!(config.payment_delay, Duration::from_millis(1500));
        assert_eq!(config.payment_timeout, Duration::from_secs(30));
        assert!(config.auto_approve);
        assert!(config.log_path.is_none());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = AdapterConfig::from_env();
    }
}
