use std::env;

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "geirio-words.json".to_string()
}

/// On-device saved-word store settings.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// Path of the single JSON document holding the saved-word list.
    #[serde(default = "default_path")]
    pub path: String,
}

impl CacheConfig {
    pub fn new() -> Self {
        let path = env::var("WORD_CACHE_PATH").unwrap_or_else(|_| default_path());
        Self { path }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
