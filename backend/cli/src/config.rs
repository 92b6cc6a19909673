use std::time::Duration;

use defectscan_analyzer::ProviderConfig;

/// DefectScan runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Where uploaded images are stored
    pub upload_dir: String,
    /// Rolling log directory
    pub log_dir: String,
    /// Log level
    pub log_level: String,
    /// Fallback order, primary first
    pub provider_order: Vec<String>,
    /// Upper bound on one whole analysis, enforced by the HTTP layer
    pub request_timeout_secs: u64,
    /// Answer from the built-in catalog instead of hosted providers
    pub offline: bool,

    pub gemini: ProviderConfig,
    pub openai: ProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            bind_address: var("DEFECTSCAN_BIND").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("DEFECTSCAN_PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(5001),
            upload_dir: var("DEFECTSCAN_UPLOAD_DIR").unwrap_or_else(|| "uploads".to_string()),
            log_dir: var("DEFECTSCAN_LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_level: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            provider_order: var("DEFECTSCAN_PROVIDERS")
                .map(|s| {
                    s.split(',')
                        .map(|p| p.trim().to_lowercase())
                        .filter(|p| !p.is_empty())
                        .collect()
                })
                .unwrap_or_else(|| vec!["gemini".to_string(), "openai".to_string()]),
            request_timeout_secs: var("DEFECTSCAN_TIMEOUT_SECS")
                .and_then(|t| t.trim().parse().ok())
                .filter(|&secs: &u64| secs > 0)
                .unwrap_or(60),
            offline: var("DEFECTSCAN_OFFLINE")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            gemini: ProviderConfig {
                api_key: var("GEMINI_API_KEY"),
                model: var("GEMINI_MODEL"),
                base_url: var("GEMINI_BASE_URL"),
            },
            openai: ProviderConfig {
                api_key: var("OPENAI_API_KEY"),
                model: var("OPENAI_MODEL"),
                base_url: var("OPENAI_BASE_URL"),
            },
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.port, 5001);
        assert_eq!(config.upload_dir, "uploads");
        assert_eq!(config.provider_order, vec!["gemini", "openai"]);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
        assert!(config.gemini.api_key.is_none());
        assert!(!config.offline);
    }

    #[test]
    fn reads_overrides() {
        let config = from_map(&[
            ("DEFECTSCAN_PORT", "8080"),
            ("DEFECTSCAN_PROVIDERS", " OpenAI , gemini,"),
            ("OPENAI_API_KEY", "sk-test"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("DEFECTSCAN_OFFLINE", "true"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.provider_order, vec!["openai", "gemini"]);
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.gemini.model.as_deref(), Some("gemini-2.0-flash"));
        assert!(config.offline);
    }

    #[test]
    fn bad_numbers_and_blank_values_fall_back() {
        let config = from_map(&[
            ("DEFECTSCAN_PORT", "not-a-port"),
            ("DEFECTSCAN_TIMEOUT_SECS", "-3"),
            ("GEMINI_API_KEY", "   "),
        ]);
        assert_eq!(config.port, 5001);
        assert_eq!(config.request_timeout_secs, 60);
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn zero_timeout_falls_back() {
        let config = from_map(&[("DEFECTSCAN_TIMEOUT_SECS", "0")]);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));

        let config = from_map(&[("DEFECTSCAN_TIMEOUT_SECS", "5")]);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }
}
