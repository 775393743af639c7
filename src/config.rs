use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub providers: ProvidersConfig,

    pub cache: CacheConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_url: String,

    pub log_level: String,

    /// Emit logs as JSON lines instead of the human readable format.
    pub json_logs: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/cityscout.db".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// Allowed CORS origins. `"*"` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 1331,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub geocode_api_key: String,

    pub weather_api_key: String,

    pub meetup_api_key: String,

    pub movie_api_key: String,

    pub yelp_api_key: String,

    pub geocode_base_url: String,

    pub weather_base_url: String,

    pub meetup_base_url: String,

    pub movie_base_url: String,

    pub yelp_base_url: String,

    /// Timeout applied to every outbound provider request (default: 15)
    pub request_timeout_seconds: u64,

    pub user_agent: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            geocode_api_key: String::new(),
            weather_api_key: String::new(),
            meetup_api_key: String::new(),
            movie_api_key: String::new(),
            yelp_api_key: String::new(),
            geocode_base_url: "https://maps.googleapis.com".to_string(),
            weather_base_url: "https://api.darksky.net".to_string(),
            meetup_base_url: "https://api.meetup.com".to_string(),
            movie_base_url: "https://api.themoviedb.org".to_string(),
            yelp_base_url: "https://api.yelp.com".to_string(),
            request_timeout_seconds: 15,
            user_agent: "CityScout/1.0".to_string(),
        }
    }
}

/// How freshly fetched records are written back to the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheWriteMode {
    /// Inserts finish before the response is sent.
    #[default]
    Awaited,

    /// Inserts run in a spawned task; failures are only logged and counted.
    Background,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub write_mode: CacheWriteMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,

    pub loki_labels: std::collections::HashMap<String, String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let mut labels = std::collections::HashMap::new();
        labels.insert("app".to_string(), "cityscout".to_string());

        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
            loki_labels: labels,
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies `.env` and process
    /// environment overrides.
    pub fn load() -> Result<Self> {
        // A missing .env file is the normal case outside development.
        let _ = dotenvy::dotenv();

        let mut config = Self::load_file()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Overrides file settings with the environment variables the service
    /// has always honoured (`DATABASE_URL`, `PORT` and one key per provider).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("DATABASE_URL") {
            self.general.database_url = url;
        }

        if let Some(port) = non_empty("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }

        let providers = &mut self.providers;
        for (key, slot) in [
            ("GEOCODE_API_KEY", &mut providers.geocode_api_key),
            ("WEATHER_API_KEY", &mut providers.weather_api_key),
            ("MEETUP_API_KEY", &mut providers.meetup_api_key),
            ("MOVIE_API_KEY", &mut providers.movie_api_key),
            ("YELP_API_KEY", &mut providers.yelp_api_key),
        ] {
            if let Some(value) = non_empty(key) {
                *slot = value;
            }
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cityscout").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cityscout").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.general.database_url.starts_with("sqlite:") {
            let scheme = self.general.database_url.split(':').next().unwrap_or_default();
            anyhow::bail!("Unsupported database_url scheme '{scheme}': only sqlite: URLs are supported");
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.providers.request_timeout_seconds == 0 {
            anyhow::bail!("Provider request timeout must be > 0");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!(
                "min_db_connections ({}) cannot exceed max_db_connections ({})",
                self.general.min_db_connections,
                self.general.max_db_connections
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 1331);
        assert_eq!(config.cache.write_mode, CacheWriteMode::Awaited);
        assert_eq!(config.providers.geocode_base_url, "https://maps.googleapis.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[providers]"));
        assert!(toml_str.contains("write_mode = \"awaited\""));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [cache]
            write_mode = "background"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.cache.write_mode, CacheWriteMode::Background);

        assert_eq!(config.server.port, 1331);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = [
            ("DATABASE_URL", "sqlite:/tmp/other.db"),
            ("PORT", "8080"),
            ("WEATHER_API_KEY", "dark-sky-key"),
            ("YELP_API_KEY", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.providers.yelp_api_key = "from-file".to_string();
        config.apply_env_overrides(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.general.database_url, "sqlite:/tmp/other.db");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.providers.weather_api_key, "dark-sky-key");
        assert_eq!(config.providers.yelp_api_key, "from-file");
    }

    #[test]
    fn invalid_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| (key == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 1331);
    }

    #[test]
    fn validate_rejects_inverted_pool_bounds() {
        let mut config = Config::default();
        config.general.min_db_connections = 10;
        config.general.max_db_connections = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_sqlite_database_url() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| {
            (key == "DATABASE_URL").then(|| "postgres://user:pw@localhost:5432/city".to_string())
        });

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("postgres"));
        assert!(!err.contains("pw@"));

        config.general.database_url = "sqlite::memory:".to_string();
        assert!(config.validate().is_ok());
    }
}
