use std::env;

use serde::{Deserialize, Serialize};

fn default_mymemory_url() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_libretranslate_url() -> String {
    "https://libretranslate.de/translate".to_string()
}

fn default_rate_limit_ms() -> u64 {
    1000
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_mymemory_url")]
    pub mymemory_url: String,
    #[serde(default = "default_libretranslate_url")]
    pub libretranslate_url: String,
    /// Minimum spacing between successive MyMemory requests.
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let mymemory_url =
            env::var("MYMEMORY_URL").unwrap_or_else(|_| default_mymemory_url());
        let libretranslate_url =
            env::var("LIBRETRANSLATE_URL").unwrap_or_else(|_| default_libretranslate_url());
        let rate_limit_ms = env::var("TRANSLATE_RATE_LIMIT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_rate_limit_ms);

        Self {
            mymemory_url,
            libretranslate_url,
            rate_limit_ms,
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            mymemory_url: default_mymemory_url(),
            libretranslate_url: default_libretranslate_url(),
            rate_limit_ms: default_rate_limit_ms(),
        }
    }
}
