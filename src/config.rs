//! Environment-driven configuration for the session layer.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the verification authority, e.g. `http://localhost:3000`.
    /// When absent the store runs in local-only mode (decode and trust).
    pub api_base: Option<String>,
    /// Directory holding the durable session entries.
    pub data_dir: PathBuf,
    /// Timeout for the remote verification call. Default is no timeout.
    pub verify_timeout: Option<Duration>,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let api_base = std::env::var("DEVTIME_API_URL").ok().filter(|s| !s.is_empty());
        let data_dir = std::env::var("DEVTIME_DATA_DIR")
            .ok()
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let verify_timeout = std::env::var("DEVTIME_VERIFY_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis);
        Self { api_base, data_dir, verify_timeout }
    }
}

fn default_data_dir() -> PathBuf {
    let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")).ok();
    match home {
        Some(h) => PathBuf::from(h).join(".devtime"),
        None => PathBuf::from(".devtime"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_round_trip() {
        std::env::set_var("DEVTIME_API_URL", "http://localhost:3000");
        std::env::set_var("DEVTIME_DATA_DIR", "/tmp/devtime-test");
        std::env::set_var("DEVTIME_VERIFY_TIMEOUT_MS", "2500");
        let cfg = SessionConfig::from_env();
        assert_eq!(cfg.api_base.as_deref(), Some("http://localhost:3000"));
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/devtime-test"));
        assert_eq!(cfg.verify_timeout, Some(Duration::from_millis(2500)));
        std::env::remove_var("DEVTIME_API_URL");
        std::env::remove_var("DEVTIME_DATA_DIR");
        std::env::remove_var("DEVTIME_VERIFY_TIMEOUT_MS");
    }

    #[test]
    fn default_dir_is_under_home_when_available() {
        let d = default_data_dir();
        assert!(d.ends_with(".devtime"));
    }
}
