//! Runtime configuration for theme synchronization

use std::time::Duration;

use serde::Deserialize;

/// Environment variable holding the backend base URL
pub const ENV_BACKEND_URL: &str = "STOREFRONT_BACKEND_URL";
/// Environment variable holding the backend anon key
pub const ENV_BACKEND_ANON_KEY: &str = "STOREFRONT_BACKEND_ANON_KEY";
/// Environment variable overriding the fallback poll interval
pub const ENV_POLL_INTERVAL_MS: &str = "STOREFRONT_POLL_INTERVAL_MS";

/// Errors raised while building configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing configuration value: {0}")]
    Missing(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Theme synchronization settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Table holding one row per settings kind
    pub settings_table: String,
    /// Column holding the settings kind
    pub key_column: String,
    /// Column holding the JSON payload
    pub value_column: String,

    /// Fallback poll interval
    pub poll_interval_ms: u64,
    /// How often the DOM applier checks for staleness
    pub self_check_interval_ms: u64,
    /// Age after which the applier re-applies unconditionally
    pub stale_after_ms: u64,
    /// Upper bound for one settings fetch, `None` to wait indefinitely
    pub fetch_timeout_ms: Option<u64>,

    /// Stylesheet endpoint for web fonts
    pub font_stylesheet_base: String,
    /// Id of the `<link>` element carrying the font stylesheet
    pub font_link_id: String,

    pub backend_url: Option<String>,
    pub backend_anon_key: Option<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            settings_table: "site_settings".to_string(),
            key_column: "key".to_string(),
            value_column: "value".to_string(),
            poll_interval_ms: 30_000,
            self_check_interval_ms: 5_000,
            stale_after_ms: 30_000,
            fetch_timeout_ms: Some(10_000),
            font_stylesheet_base: "https://fonts.googleapis.com/css2".to_string(),
            font_link_id: "theme-fonts".to_string(),
            backend_url: None,
            backend_anon_key: None,
        }
    }
}

impl ThemeConfig {
    /// Parse a JSON document; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with the `STOREFRONT_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            backend_url: lookup(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()),
            backend_anon_key: lookup(ENV_BACKEND_ANON_KEY).filter(|v| !v.trim().is_empty()),
            ..Self::default()
        };

        if let Some(raw) = lookup(ENV_POLL_INTERVAL_MS) {
            config.poll_interval_ms = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_POLL_INTERVAL_MS}='{raw}' is not a number"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be > 0".into()));
        }
        if self.self_check_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "self_check_interval_ms must be > 0".into(),
            ));
        }
        if self.settings_table.trim().is_empty() {
            return Err(ConfigError::Invalid("settings_table is empty".into()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn self_check_interval(&self) -> Duration {
        Duration::from_millis(self.self_check_interval_ms)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json() {
        let config = ThemeConfig::from_json(r#"{ "poll_interval_ms": 1000 }"#).unwrap();
        assert_eq!(config.poll_interval(), Duration::from_millis(1000));
        assert_eq!(config.settings_table, "site_settings");
        assert_eq!(config.fetch_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(matches!(
            ThemeConfig::from_json(r#"{ "poll_interval_ms": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_env_lookup() {
        let config = ThemeConfig::from_lookup(|name| match name {
            ENV_BACKEND_URL => Some("https://project.example.co".to_string()),
            ENV_BACKEND_ANON_KEY => Some("  ".to_string()),
            ENV_POLL_INTERVAL_MS => Some("15000".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(
            config.backend_url.as_deref(),
            Some("https://project.example.co")
        );
        assert_eq!(config.backend_anon_key, None);
        assert_eq!(config.poll_interval_ms, 15_000);
    }

    #[test]
    fn test_env_bad_number() {
        let result = ThemeConfig::from_lookup(|name| {
            (name == ENV_POLL_INTERVAL_MS).then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
