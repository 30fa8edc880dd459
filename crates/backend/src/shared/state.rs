use std::sync::Arc;

use super::config::Config;

/// Integration settings handed to handlers through axum state. Kept off
/// globals so tests and one-off tools can run with their own values.
#[derive(Debug, Clone)]
pub struct AppState {
    pub crm_base_url: String,
    pub crm_api_key: Option<String>,
    pub sync_secret: Option<String>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            crm_base_url: config.crm.base_url.clone(),
            crm_api_key: config.crm.api_key.clone(),
            sync_secret: config.sync.secret.clone(),
        }
    }

    pub fn crm_configured(&self) -> bool {
        self.crm_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    pub fn secret_configured(&self) -> bool {
        self.sync_secret.as_deref().is_some_and(|s| !s.is_empty())
    }
}
