//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Deployment Metadata ===
    /// Environment name (development, production, ...).
    #[serde(default = "default_node_env")]
    pub node_env: String,

    /// Version string reported by /health and /api/info.
    #[serde(default = "default_app_version")]
    pub app_version: String,

    /// Application name reported by /api/info.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    // === Store ===
    /// Seed the store with three sample items at startup.
    #[serde(default = "default_true")]
    pub seed_sample_items: bool,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Log output format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_port() -> u16 {
    3000
}

fn default_node_env() -> String {
    "development".to_string()
}

fn default_app_version() -> String {
    "1.0.0".to_string()
}

fn default_app_name() -> String {
    "Docker Swarm Lab API".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            node_env: default_node_env(),
            app_version: default_app_version(),
            app_name: default_app_name(),
            seed_sample_items: default_true(),
            rust_log: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be between 1 and 65535".to_string());
        }

        if self.node_env.trim().is_empty() {
            return Err("NODE_ENV must not be empty".to_string());
        }

        if self.app_version.trim().is_empty() {
            return Err("APP_VERSION must not be empty".to_string());
        }

        if !matches!(self.log_format.as_str(), "text" | "json") {
            return Err(format!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            ));
        }

        Ok(())
    }

    /// Whether logs should be emitted as JSON lines.
    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.node_env, "development");
        assert_eq!(config.app_version, "1.0.0");
        assert!(config.seed_sample_items);
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn envy_fills_defaults_for_missing_vars() {
        let vars = vec![("NODE_ENV".to_string(), "production".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.app_version, "1.0.0");
        assert_eq!(config.node_env, "production");
    }

    #[test]
    fn envy_parses_port_and_flags() {
        let vars = vec![
            ("PORT".to_string(), "8081".to_string()),
            ("SEED_SAMPLE_ITEMS".to_string(), "false".to_string()),
            ("LOG_FORMAT".to_string(), "json".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.port, 8081);
        assert!(!config.seed_sample_items);
        assert!(config.json_logs());
    }

    #[test]
    fn validate_rejects_empty_environment() {
        let config = Config {
            node_env: "  ".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_log_format() {
        let config = Config {
            log_format: "xml".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_port_zero() {
        let config = Config {
            port: 0,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }
}
