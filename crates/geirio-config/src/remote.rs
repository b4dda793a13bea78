use std::env;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://welsh-dictionary.ac.uk".to_string()
}

fn default_user_token() -> String {
    "JS-800509a27d53b2ebd993033281540897".to_string()
}

fn default_proxy_url() -> String {
    "https://welsh-trainer.onrender.com".to_string()
}

fn default_max_results() -> u32 {
    20
}

/// GPC servlet and proxy endpoint settings.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GpcConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Client identifier token the servlet expects on every request.
    #[serde(default = "default_user_token")]
    pub user_token: String,
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl GpcConfig {
    pub fn new() -> Self {
        let base_url = env::var("GPC_BASE_URL").unwrap_or_else(|_| default_base_url());
        let user_token = env::var("GPC_USER_TOKEN").unwrap_or_else(|_| default_user_token());
        let proxy_url = env::var("GPC_PROXY_URL").unwrap_or_else(|_| default_proxy_url());
        let max_results = env::var("GPC_MAX_RESULTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_results);

        Self {
            base_url,
            user_token,
            proxy_url,
            max_results,
        }
    }
}

impl Default for GpcConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_token: default_user_token(),
            proxy_url: default_proxy_url(),
            max_results: default_max_results(),
        }
    }
}
