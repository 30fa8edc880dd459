use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub crm: CrmConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CrmConfig {
    /// CRM REST base URL.
    #[serde(default = "default_crm_base_url")]
    pub base_url: String,
    /// Private app token. Absent means the sync surface reports "not
    /// configured" and any sync attempt fails at first use.
    pub api_key: Option<String>,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_crm_base_url(),
            api_key: None,
        }
    }
}

fn default_crm_base_url() -> String {
    "https://api.hubapi.com".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SyncConfig {
    /// Bearer secret required by the sync trigger endpoints. Absent means
    /// the trigger is open (local/dev deployments).
    pub secret: Option<String>,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/app.db"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// `CRM_API_KEY` and `SYNC_SECRET` environment variables override the file,
/// so secrets can stay out of it.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;

    if let Ok(key) = std::env::var("CRM_API_KEY") {
        if !key.is_empty() {
            config.crm.api_key = Some(key);
        }
    }
    if let Ok(secret) = std::env::var("SYNC_SECRET") {
        if !secret.is_empty() {
            config.sync.secret = Some(secret);
        }
    }

    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(db_path);
            return Ok(resolved_path);
        }
    }

    // Fallback: use relative to current directory
    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.database.path, "target/db/app.db");
        assert!(config.crm.api_key.is_none());
        assert!(config.sync.secret.is_none());
        assert_eq!(config.crm.base_url, "https://api.hubapi.com");
    }

    #[test]
    fn test_crm_section_parses() {
        let raw = r#"
            [database]
            path = "x.db"

            [crm]
            base_url = "https://crm.example.com"
            api_key = "pat-123"

            [sync]
            secret = "s3cret"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.crm.base_url, "https://crm.example.com");
        assert_eq!(config.crm.api_key.as_deref(), Some("pat-123"));
        assert_eq!(config.sync.secret.as_deref(), Some("s3cret"));
    }
}
