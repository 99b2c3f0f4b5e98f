//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_age_secs` is 0 or exceeds one day
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `user_agent` is empty
    /// - `cache_dir` equals `data_dir`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_age_secs == 0 {
            return Err(ConfigError::Invalid { field: "max_age_secs".into(), reason: "must be greater than 0".into() });
        }
        if self.max_age_secs > 86_400 {
            return Err(ConfigError::Invalid {
                field: "max_age_secs".into(),
                reason: "must not exceed one day (86400s)".into(),
            });
        }

        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.data_dir == self.cache_dir {
            return Err(ConfigError::Invalid {
                field: "cache_dir".into(),
                reason: "must differ from data_dir, both keep a `searches` subdirectory".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_age_zero() {
        let config = AppConfig { max_age_secs: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_age_secs"));
    }

    #[test]
    fn test_validate_max_age_exceeds_limit() {
        let config = AppConfig { max_age_secs: 86_401, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_age_secs"));
    }

    #[test]
    fn test_validate_max_bytes_zero() {
        let config = AppConfig { max_bytes: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_bytes"));
    }

    #[test]
    fn test_validate_max_bytes_exceeds_limit() {
        let config = AppConfig { max_bytes: 51 * 1024 * 1024, ..Default::default() }; // 51MB
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_bytes"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_shared_directory() {
        let config = AppConfig { data_dir: "/wf".into(), cache_dir: "/wf".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "cache_dir"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig { max_age_secs: 1, max_bytes: 1, ..Default::default() };
        assert!(config.validate().is_ok());

        let config = AppConfig { max_age_secs: 86_400, max_bytes: 50 * 1024 * 1024, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
